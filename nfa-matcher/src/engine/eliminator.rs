//! Epsilon elimination through epsilon-closures

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::automaton::{Label, Nfa, StateId, Transition};

/// States reachable from `state` over epsilon transitions only, `state` included
pub fn epsilon_closure(nfa: &Nfa, state: StateId) -> BTreeSet<StateId> {
    let mut closure = BTreeSet::from([state]);
    let mut queue = VecDeque::from([state]);

    while let Some(s) = queue.pop_front() {
        for t in nfa.outgoing(s) {
            // `insert` is false for states already seen, which keeps cycles finite
            if t.label == Label::Epsilon && closure.insert(t.to) {
                queue.push_back(t.to);
            }
        }
    }

    closure
}

/// Produces an equivalent automaton without epsilon transitions
///
/// Each state takes over the symbol transitions of its whole epsilon-closure
/// and becomes accepting when any member of the closure is accepting.
pub fn eliminate(nfa: &Nfa) -> Nfa {
    nfa.debug_validate();

    let mut transitions: BTreeMap<StateId, Vec<Transition>> = BTreeMap::new();
    let mut accepts = BTreeSet::new();

    for state in nfa.states() {
        for member in epsilon_closure(nfa, state) {
            let symbols = nfa
                .outgoing(member)
                .iter()
                .filter(|t| t.label != Label::Epsilon);
            let hoisted: Vec<Transition> = symbols.copied().collect();
            if !hoisted.is_empty() {
                transitions.entry(state).or_default().extend(hoisted);
            }

            if nfa.is_accepting(member) {
                accepts.insert(state);
            }
        }
    }

    // accepting states are never lost, even without transitions of their own
    accepts.extend(nfa.accepts.iter().copied());

    let result = Nfa {
        start: nfa.start,
        accepts,
        transitions,
        num_states: nfa.num_states,
    };
    result.debug_validate();
    debug_assert!(!result.has_epsilon());
    result
}
