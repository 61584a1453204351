use std::collections::{HashSet, VecDeque};

use super::automaton::{Label, Nfa, StateId};

/// Worklist discipline used while exploring configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Search {
    /// Depth first, with a stack
    #[default]
    Depth,
    /// Breadth first, with a queue
    Width,
}

/// (state, position in the word)
type Config = (StateId, usize);

/// Worklist over configurations. `Depth` pops from the back, `Width` from the front.
struct Worklist {
    search: Search,
    items: VecDeque<Config>,
}

impl Worklist {
    fn new(search: Search, first: Config) -> Self {
        Worklist {
            search,
            items: VecDeque::from([first]),
        }
    }

    fn push(&mut self, config: Config) {
        self.items.push_back(config);
    }

    fn pop(&mut self) -> Option<Config> {
        match self.search {
            Search::Depth => self.items.pop_back(),
            Search::Width => self.items.pop_front(),
        }
    }
}

/// Returns `true` if `nfa` accepts `word`, exploring depth first
pub fn accepts(nfa: &Nfa, word: &[u8]) -> bool {
    accepts_with(nfa, word, Search::Depth)
}

/// Returns `true` if some path from `(start, 0)` ends in an accepting state
/// after consuming the whole `word`
///
/// Every `(state, position)` pair is expanded at most once, so the search
/// terminates on cyclic automata. Epsilon transitions are followed without
/// consuming input.
pub fn accepts_with(nfa: &Nfa, word: &[u8], search: Search) -> bool {
    let mut work = Worklist::new(search, (nfa.start, 0));
    let mut visited: HashSet<Config> = HashSet::new();

    while let Some((state, pos)) = work.pop() {
        if pos == word.len() && nfa.is_accepting(state) {
            return true;
        }

        if !visited.insert((state, pos)) {
            continue;
        }

        for t in nfa.outgoing(state) {
            match t.label {
                Label::Epsilon => work.push((t.to, pos)),
                Label::Symbol(c) => {
                    if word.get(pos) == Some(&c) {
                        work.push((t.to, pos + 1));
                    }
                }
            }
        }
    }

    false
}
