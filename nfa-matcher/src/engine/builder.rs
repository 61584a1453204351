//! Thompson's construction

use std::collections::{BTreeMap, BTreeSet};

use super::automaton::{Nfa, StateId, Transition};
use crate::regexp::RegExp;

/// Default bound on expression nesting accepted by [`build`]
pub const DEFAULT_MAX_NESTING: usize = 2048;

/// Errors raised while compiling an expression into an automaton
#[derive(Debug, PartialEq)]
pub enum BuildError {
    /// The expression contains a node kind the builder does not know
    UnrecognizedNodeKind,
    /// The state id counter overflowed
    StateIdOverflow,
    /// The expression is nested deeper than the given limit
    NestingTooDeep(usize),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuildError: {self:?}")
    }
}

impl std::error::Error for BuildError {}

/// Sub-automaton with a single entry and a single exit state
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fragment {
    start: StateId,
    exit: StateId,
}

#[derive(Debug)]
struct Builder {
    /// next free state id
    next_id: StateId,
    transitions: BTreeMap<StateId, Vec<Transition>>,
    depth: usize,
    max_nesting: usize,
}

impl Builder {
    fn new(max_nesting: usize) -> Self {
        Builder {
            next_id: 0,
            transitions: BTreeMap::new(),
            depth: 0,
            max_nesting,
        }
    }

    fn fresh_state(&mut self) -> Result<StateId, BuildError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(BuildError::StateIdOverflow)?;
        Ok(id)
    }

    /// Allocates the entry and exit states of a new fragment
    fn fresh_fragment(&mut self) -> Result<Fragment, BuildError> {
        let start = self.fresh_state()?;
        let exit = self.fresh_state()?;
        Ok(Fragment { start, exit })
    }

    fn push(&mut self, from: StateId, transition: Transition) {
        self.transitions.entry(from).or_default().push(transition);
    }

    fn gen_expr(&mut self, ast: &RegExp) -> Result<Fragment, BuildError> {
        if self.depth >= self.max_nesting {
            return Err(BuildError::NestingTooDeep(self.max_nesting));
        }
        self.depth += 1;

        let fragment = match ast {
            RegExp::Symbol(c) => self.gen_symbol(*c),
            RegExp::Epsilon => self.gen_epsilon(),
            RegExp::Empty => self.gen_empty(),
            RegExp::Alternation(l, r) => self.gen_alternation(l, r),
            RegExp::Concatenation(l, r) => self.gen_concatenation(l, r),
            RegExp::Iteration(n) => self.gen_iteration(n),
        };

        self.depth -= 1;
        fragment
    }

    fn gen_symbol(&mut self, c: u8) -> Result<Fragment, BuildError> {
        let frag = self.fresh_fragment()?;
        self.push(frag.start, Transition::symbol(frag.exit, c));
        Ok(frag)
    }

    fn gen_epsilon(&mut self) -> Result<Fragment, BuildError> {
        let frag = self.fresh_fragment()?;
        self.push(frag.start, Transition::epsilon(frag.exit));
        Ok(frag)
    }

    /// Exit is unreachable from the entry
    fn gen_empty(&mut self) -> Result<Fragment, BuildError> {
        self.fresh_fragment()
    }

    fn gen_alternation(&mut self, l: &RegExp, r: &RegExp) -> Result<Fragment, BuildError> {
        let left = self.gen_expr(l)?;
        let right = self.gen_expr(r)?;
        let frag = self.fresh_fragment()?;

        self.push(frag.start, Transition::epsilon(left.start));
        self.push(frag.start, Transition::epsilon(right.start));
        self.push(left.exit, Transition::epsilon(frag.exit));
        self.push(right.exit, Transition::epsilon(frag.exit));

        Ok(frag)
    }

    fn gen_concatenation(&mut self, l: &RegExp, r: &RegExp) -> Result<Fragment, BuildError> {
        let left = self.gen_expr(l)?;
        let right = self.gen_expr(r)?;

        self.push(left.exit, Transition::epsilon(right.start));

        Ok(Fragment {
            start: left.start,
            exit: right.exit,
        })
    }

    fn gen_iteration(&mut self, n: &RegExp) -> Result<Fragment, BuildError> {
        let node = self.gen_expr(n)?;
        let frag = self.fresh_fragment()?;

        self.push(frag.start, Transition::epsilon(node.start));
        self.push(node.exit, Transition::epsilon(frag.exit));
        // zero repetitions
        self.push(frag.start, Transition::epsilon(frag.exit));
        // one more repetition
        self.push(node.exit, Transition::epsilon(node.start));

        Ok(frag)
    }

    fn gen_code(mut self, ast: &RegExp) -> Result<Nfa, BuildError> {
        let frag = self.gen_expr(ast)?;
        let nfa = Nfa {
            start: frag.start,
            accepts: BTreeSet::from([frag.exit]),
            transitions: self.transitions,
            num_states: self.next_id,
        };
        nfa.debug_validate();
        Ok(nfa)
    }
}

/// Compiles `ast` into an epsilon-NFA with a single accepting state
pub fn build(ast: &RegExp) -> Result<Nfa, BuildError> {
    build_with_limit(ast, DEFAULT_MAX_NESTING)
}

/// Like [`build`], failing with [`BuildError::NestingTooDeep`] when `ast`
/// is nested deeper than `max_nesting`
pub fn build_with_limit(ast: &RegExp, max_nesting: usize) -> Result<Nfa, BuildError> {
    Builder::new(max_nesting).gen_code(ast)
}
