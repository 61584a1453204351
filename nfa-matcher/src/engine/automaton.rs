use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

/// State identifier. Ids are handed out by a counter and never reused.
pub type StateId = usize;

/// Transition label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Consumes one input symbol equal to the `u8`
    Symbol(u8),
    /// Consumes nothing
    Epsilon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: StateId,
    pub label: Label,
}

impl Transition {
    pub fn symbol(to: StateId, c: u8) -> Self {
        Transition {
            to,
            label: Label::Symbol(c),
        }
    }

    pub fn epsilon(to: StateId) -> Self {
        Transition {
            to,
            label: Label::Epsilon,
        }
    }
}

/// Nondeterministic finite automaton
///
/// States are `0..num_states`. A state missing from `transitions` has no
/// outgoing transitions. An automaton without accepting states accepts nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    pub start: StateId,
    pub accepts: BTreeSet<StateId>,
    pub transitions: BTreeMap<StateId, Vec<Transition>>,
    pub num_states: StateId,
}

impl Nfa {
    /// Outgoing transitions of `state`, in insertion order
    pub fn outgoing(&self, state: StateId) -> &[Transition] {
        self.transitions
            .get(&state)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepts.contains(&state)
    }

    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.num_states
    }

    pub fn has_epsilon(&self) -> bool {
        self.transitions
            .values()
            .flatten()
            .any(|t| t.label == Label::Epsilon)
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Checks that every referenced state was allocated. Only active in debug builds.
    pub fn debug_validate(&self) {
        debug_assert!(self.start < self.num_states, "start state {} out of range", self.start);
        for s in &self.accepts {
            debug_assert!(*s < self.num_states, "accepting state {s} out of range");
        }
        for (from, ts) in &self.transitions {
            debug_assert!(*from < self.num_states, "source state {from} out of range");
            for t in ts {
                debug_assert!(t.to < self.num_states, "target state {} out of range", t.to);
            }
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(c) if c.is_ascii_graphic() => write!(f, "{}", *c as char),
            Label::Symbol(c) => write!(f, "0x{c:x}"),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, ts) in &self.transitions {
            for t in ts {
                writeln!(f, "{from:>04} -{}-> {:>04}", t.label, t.to)?;
            }
        }
        writeln!(f, "start {:>04}", self.start)?;
        write!(f, "accept")?;
        for s in &self.accepts {
            write!(f, " {s:>04}")?;
        }
        Ok(())
    }
}
