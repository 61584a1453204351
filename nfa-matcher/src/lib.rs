//! Regular expression matching over byte words with Thompson NFAs
//!
//! An expression tree is compiled into an NFA (Thompson's construction), its
//! epsilon transitions are removed through epsilon-closures, and the result is
//! simulated against each word.
//!
//! ```
//! use nfa_matcher::{words_match, RegExp};
//! // (a+b)* a b
//! let ab = RegExp::alt(RegExp::symbol(b'a'), RegExp::symbol(b'b'));
//! let expr = RegExp::concat(
//!     RegExp::concat(RegExp::star(ab), RegExp::symbol(b'a')),
//!     RegExp::symbol(b'b'),
//! );
//! let words = vec![b"ab".to_vec(), b"ba".to_vec(), b"bbab".to_vec()];
//! let matched = words_match(&expr, &words).unwrap();
//! assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![0, 2]);
//! ```

pub mod engine;
mod helper;
mod regexp;

use std::collections::BTreeSet;

pub use engine::{do_matching, BuildError, Nfa, Search};
pub use helper::DynError;
pub use regexp::{DisplayWord, RegExp, Word};

/// Knobs for compiling and simulating an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub search: Search,
    /// Deepest expression nesting the builder accepts
    pub max_nesting: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            search: Search::default(),
            max_nesting: engine::DEFAULT_MAX_NESTING,
        }
    }
}

/// An expression compiled into an epsilon-free automaton
///
/// The automaton is never mutated after construction, so one `Matcher` can be
/// shared between threads.
///
/// ```
/// use nfa_matcher::{Matcher, RegExp};
/// let matcher = Matcher::new(&RegExp::star(RegExp::symbol(b'x'))).unwrap();
/// assert!(matcher.is_match(b""));
/// assert!(matcher.is_match(b"xxx"));
/// assert!(!matcher.is_match(b"xy"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    nfa: Nfa,
    search: Search,
}

impl Matcher {
    pub fn new(expr: &RegExp) -> Result<Self, BuildError> {
        Self::with_config(expr, MatchConfig::default())
    }

    pub fn with_config(expr: &RegExp, config: MatchConfig) -> Result<Self, BuildError> {
        let raw = engine::build_with_limit(expr, config.max_nesting)?;
        Ok(Matcher {
            nfa: engine::eliminate(&raw),
            search: config.search,
        })
    }

    pub fn is_match(&self, word: &[u8]) -> bool {
        engine::accepts_with(&self.nfa, word, self.search)
    }

    /// Indices of the words in `words` that match
    pub fn matching_indices(&self, words: &[Word]) -> BTreeSet<usize> {
        words
            .iter()
            .enumerate()
            .filter(|(_, w)| self.is_match(w))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn automaton(&self) -> &Nfa {
        &self.nfa
    }
}

/// Indices of the words in `words` matched by `expr`
pub fn words_match(expr: &RegExp, words: &[Word]) -> Result<BTreeSet<usize>, BuildError> {
    Ok(Matcher::new(expr)?.matching_indices(words))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sym(c: u8) -> RegExp {
        RegExp::symbol(c)
    }

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    fn a_or_b_star() -> RegExp {
        RegExp::star(RegExp::alt(sym(b'a'), sym(b'b')))
    }

    /// (a+b)* a b (a+b)*
    fn contains_ab() -> RegExp {
        RegExp::concat(
            RegExp::concat(RegExp::concat(a_or_b_star(), sym(b'a')), sym(b'b')),
            a_or_b_star(),
        )
    }

    /// 0 1 1 ((0 1 1) + (1 0* 1) + 0)*
    fn binary() -> RegExp {
        let prefix = || RegExp::concat(RegExp::concat(sym(b'0'), sym(b'1')), sym(b'1'));
        let one_zeros_one = RegExp::concat(
            RegExp::concat(sym(b'1'), RegExp::star(sym(b'0'))),
            sym(b'1'),
        );
        RegExp::concat(
            prefix(),
            RegExp::star(RegExp::alt(RegExp::alt(prefix(), one_zeros_one), sym(b'0'))),
        )
    }

    fn is_match(expr: &RegExp, word: &[u8]) -> bool {
        Matcher::new(expr).unwrap().is_match(word)
    }

    #[test]
    fn single_symbol() {
        let expr = sym(b'h');

        assert_eq!(words_match(&expr, &[b"h".to_vec()]).unwrap(), set(&[0]));
        assert!(!is_match(&expr, b"x"));
        assert!(!is_match(&expr, b""));
    }

    #[test]
    fn contains_ab_words() {
        let expr = contains_ab();

        assert!(!is_match(&expr, b""));
        assert!(is_match(&expr, b"ab"));
        assert!(!is_match(&expr, b"a"));
        assert!(!is_match(&expr, b"aaaa"));
        assert!(!is_match(&expr, b"aaac"));
        assert!(!is_match(&expr, &[b'a', b'a', 0x07, b'c']));
        assert!(is_match(&expr, b"aab"));
    }

    #[test]
    fn starred_contains_ab_batch() {
        let expr = RegExp::star(contains_ab());
        let words: Vec<Word> = vec![
            b"".to_vec(),
            b"ab".to_vec(),
            b"a".to_vec(),
            b"aaaa".to_vec(),
            b"aaac".to_vec(),
            vec![b'a', b'a', 0x07, b'c'],
            b"aab".to_vec(),
            b"aabaabaabaabaabaab".to_vec(),
        ];

        assert_eq!(words_match(&expr, &words).unwrap(), set(&[0, 1, 6, 7]));
    }

    #[test]
    fn concatenated_empty_matches_nothing() {
        // (((a+b)* (c+d)*) (e+f)*)* #0 (a+b)*
        let cd = RegExp::star(RegExp::alt(sym(b'c'), sym(b'd')));
        let ef = RegExp::star(RegExp::alt(sym(b'e'), sym(b'f')));
        let expr = RegExp::concat(
            RegExp::concat(
                RegExp::star(RegExp::concat(RegExp::concat(a_or_b_star(), cd), ef)),
                RegExp::empty(),
            ),
            a_or_b_star(),
        );
        let words: Vec<Word> = vec![
            b"".to_vec(),
            b"ab".to_vec(),
            b"abcd".to_vec(),
            b"abcdef".to_vec(),
            b"abcdefab".to_vec(),
        ];

        assert!(words_match(&expr, &words).unwrap().is_empty());
    }

    #[test]
    fn binary_words() {
        let expr = binary();

        assert!(!is_match(&expr, b"01"));
        assert!(is_match(&expr, b"011"));
        assert!(is_match(&expr, b"0110"));
        assert!(!is_match(&expr, b"0110111000"));
        assert!(is_match(&expr, b"0110111001"));

        let words: Vec<Word> = vec![
            b"01".to_vec(),
            b"011".to_vec(),
            b"0110".to_vec(),
            b"0110111000".to_vec(),
            b"0110111001".to_vec(),
            b"01101110010".to_vec(),
        ];
        assert_eq!(words_match(&expr, &words).unwrap(), set(&[1, 2, 4, 5]));
    }

    #[test]
    fn epsilon_and_empty() {
        for word in [&b""[..], &b"a"[..], &b"ab"[..]] {
            assert!(!is_match(&RegExp::empty(), word));
            assert_eq!(is_match(&RegExp::epsilon(), word), word.is_empty());
        }
    }

    #[test]
    fn width_search_config() {
        let config = MatchConfig {
            search: Search::Width,
            ..MatchConfig::default()
        };
        let matcher = Matcher::with_config(&binary(), config).unwrap();

        assert!(matcher.is_match(b"01101110010"));
        assert!(!matcher.is_match(b"0110111000"));
    }

    #[test]
    fn nesting_limit_config() {
        let expr = binary();
        let depth = expr.depth();
        assert_eq!(depth, 8);

        let tight = MatchConfig {
            max_nesting: depth - 1,
            ..MatchConfig::default()
        };
        assert_eq!(
            Matcher::with_config(&expr, tight).unwrap_err(),
            BuildError::NestingTooDeep(depth - 1)
        );

        let exact = MatchConfig {
            max_nesting: depth,
            ..MatchConfig::default()
        };
        assert!(Matcher::with_config(&expr, exact).is_ok());
    }

    #[test]
    fn automaton_is_epsilon_free() {
        let matcher = Matcher::new(&binary()).unwrap();

        assert!(!matcher.automaton().has_epsilon());
    }

    #[test]
    fn raw_byte_symbols() {
        // (0x00+0xff)* 0x7f
        let expr = RegExp::concat(
            RegExp::star(RegExp::alt(sym(0x00), sym(0xff))),
            sym(0x7f),
        );
        let words: Vec<Word> = vec![
            vec![0x7f],
            vec![0x00, 0xff, 0x7f],
            vec![0xff, 0xff, 0x00, 0x7f],
            vec![0x00],
            vec![0x7f, 0x7f],
            vec![0x80, 0x7f],
            vec![],
        ];

        assert_eq!(words_match(&expr, &words).unwrap(), set(&[0, 1, 2]));
    }

    #[test]
    fn high_byte_star() {
        let expr = RegExp::star(sym(0x80));

        assert!(is_match(&expr, &[]));
        assert!(is_match(&expr, &[0x80, 0x80, 0x80]));
        assert!(!is_match(&expr, &[0x80, 0x00]));
        assert!(!is_match(&expr, &[0xff]));
    }

    #[test]
    fn shared_between_threads() {
        let matcher = &Matcher::new(&contains_ab()).unwrap();
        let words: Vec<Word> = vec![b"ab".to_vec(), b"ba".to_vec(), b"bbab".to_vec(), b"".to_vec()];

        let results: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = words
                .iter()
                .map(|w| s.spawn(move || matcher.is_match(w)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results, vec![true, false, true, false]);
    }

    /// Matches `word` directly from the definition of each operator
    fn reference(expr: &RegExp, word: &[u8]) -> bool {
        match expr {
            RegExp::Empty => false,
            RegExp::Epsilon => word.is_empty(),
            RegExp::Symbol(c) => word == [*c],
            RegExp::Alternation(l, r) => reference(l, word) || reference(r, word),
            RegExp::Concatenation(l, r) => {
                (0..=word.len()).any(|i| reference(l, &word[..i]) && reference(r, &word[i..]))
            }
            RegExp::Iteration(n) => {
                word.is_empty()
                    || (1..=word.len())
                        .any(|i| reference(n, &word[..i]) && reference(expr, &word[i..]))
            }
        }
    }

    fn regexp_strategy() -> impl Strategy<Value = RegExp> {
        let leaf = prop_oneof![
            3 => prop::sample::select(vec![b'a', b'b', 0x00, 0xff]).prop_map(RegExp::symbol),
            1 => Just(RegExp::Epsilon),
            1 => Just(RegExp::Empty),
        ];
        leaf.prop_recursive(4, 16, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(l, r)| RegExp::alt(l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| RegExp::concat(l, r)),
                inner.prop_map(RegExp::star),
            ]
        })
    }

    fn word_strategy() -> impl Strategy<Value = Word> {
        proptest::collection::vec(prop::sample::select(vec![b'a', b'b', b'c', 0x00, 0xff]), 0..=4)
    }

    fn words_strategy() -> impl Strategy<Value = Vec<Word>> {
        proptest::collection::vec(word_strategy(), 1..16)
    }

    proptest! {
        #[test]
        fn elimination_preserves_language(expr in regexp_strategy(), words in words_strategy()) {
            let raw = engine::build(&expr).unwrap();
            let nfa = engine::eliminate(&raw);

            for w in &words {
                let expected = engine::accepts(&raw, w);
                prop_assert_eq!(
                    engine::accepts(&nfa, w),
                    expected,
                    "{} on {}",
                    expr,
                    DisplayWord(w)
                );
                prop_assert_eq!(
                    engine::accepts_with(&nfa, w, Search::Width),
                    expected,
                    "{} on {}",
                    expr,
                    DisplayWord(w)
                );
            }
        }

        #[test]
        fn agrees_with_reference(expr in regexp_strategy(), words in words_strategy()) {
            let matcher = Matcher::new(&expr).unwrap();

            for w in &words {
                prop_assert_eq!(
                    matcher.is_match(w),
                    reference(&expr, w),
                    "{} on {}",
                    expr,
                    DisplayWord(w)
                );
            }
        }

        #[test]
        fn operator_laws(
            l in regexp_strategy(),
            r in regexp_strategy(),
            words in words_strategy()
        ) {
            let ml = Matcher::new(&l).unwrap();
            let mr = Matcher::new(&r).unwrap();
            let alt = Matcher::new(&RegExp::alt(l.clone(), r.clone())).unwrap();
            let cat = Matcher::new(&RegExp::concat(l.clone(), r.clone())).unwrap();
            let star = Matcher::new(&RegExp::star(l.clone())).unwrap();

            for w in &words {
                prop_assert_eq!(alt.is_match(w), ml.is_match(w) || mr.is_match(w));
                let split = (0..=w.len()).any(|i| ml.is_match(&w[..i]) && mr.is_match(&w[i..]));
                prop_assert_eq!(cat.is_match(w), split);
                let pieces = w.is_empty()
                    || (1..=w.len()).any(|i| ml.is_match(&w[..i]) && star.is_match(&w[i..]));
                prop_assert_eq!(star.is_match(w), pieces);
            }
        }
    }
}
