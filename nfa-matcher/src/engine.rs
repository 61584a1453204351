mod automaton;
mod builder;
mod eliminator;
mod simulator;

pub use automaton::{Label, Nfa, StateId, Transition};
pub use builder::{build, build_with_limit, BuildError, DEFAULT_MAX_NESTING};
pub use eliminator::{eliminate, epsilon_closure};
pub use simulator::{accepts, accepts_with, Search};

/// Compiles `expr` and matches a single `word` against it
///
/// The automaton is rebuilt on every call; use [`crate::Matcher`] to match
/// many words against one expression.
pub fn do_matching(expr: &crate::RegExp, word: &[u8], search: Search) -> Result<bool, BuildError> {
    let nfa = eliminate(&build(expr)?);
    Ok(accepts_with(&nfa, word, search))
}
