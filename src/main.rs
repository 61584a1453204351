use nfa_matcher::{DisplayWord, DynError, MatchConfig, Matcher, RegExp, Search, Word};

fn sym(c: u8) -> RegExp {
    RegExp::symbol(c)
}

fn a_or_b_star() -> RegExp {
    RegExp::star(RegExp::alt(sym(b'a'), sym(b'b')))
}

/// Expressions paired with words and the indices expected to match
fn scenarios() -> Vec<(RegExp, Vec<Word>, Vec<usize>)> {
    let contains_ab = RegExp::concat(
        RegExp::concat(RegExp::concat(a_or_b_star(), sym(b'a')), sym(b'b')),
        a_or_b_star(),
    );

    let prefix = || RegExp::concat(RegExp::concat(sym(b'0'), sym(b'1')), sym(b'1'));
    let one_zeros_one = RegExp::concat(
        RegExp::concat(sym(b'1'), RegExp::star(sym(b'0'))),
        sym(b'1'),
    );
    let binary = RegExp::concat(
        prefix(),
        RegExp::star(RegExp::alt(RegExp::alt(prefix(), one_zeros_one), sym(b'0'))),
    );

    vec![
        (sym(b'h'), vec![b"h".to_vec(), b"x".to_vec()], vec![0]),
        (
            RegExp::star(contains_ab),
            vec![
                b"".to_vec(),
                b"ab".to_vec(),
                b"a".to_vec(),
                b"aaaa".to_vec(),
                b"aaac".to_vec(),
                vec![b'a', b'a', 0x07, b'c'],
                b"aab".to_vec(),
                b"aabaabaabaabaabaab".to_vec(),
            ],
            vec![0, 1, 6, 7],
        ),
        (
            binary,
            vec![
                b"01".to_vec(),
                b"011".to_vec(),
                b"0110".to_vec(),
                b"0110111000".to_vec(),
                b"0110111001".to_vec(),
                b"01101110010".to_vec(),
            ],
            vec![1, 2, 4, 5],
        ),
    ]
}

fn search_from_args() -> Result<Search, DynError> {
    match std::env::args().nth(1).as_deref() {
        None | Some("depth") => Ok(Search::Depth),
        Some("width") => Ok(Search::Width),
        Some(other) => Err(format!("unknown search `{other}`, expected `depth` or `width`").into()),
    }
}

fn run() -> Result<bool, DynError> {
    let config = MatchConfig {
        search: search_from_args()?,
        ..MatchConfig::default()
    };

    let mut all_ok = true;
    for (expr, words, expected) in scenarios() {
        println!("{expr}");
        let matcher = Matcher::with_config(&expr, config)?;
        let matched = matcher.matching_indices(&words);

        for (i, w) in words.iter().enumerate() {
            let verdict = if matched.contains(&i) { "match" } else { "no match" };
            println!("  [{i}] {} -> {verdict}", DisplayWord(w));
        }

        if matched.into_iter().collect::<Vec<_>>() != expected {
            eprintln!("unexpected result for {expr}, expected {expected:?}");
            all_ok = false;
        }
    }

    Ok(all_ok)
}

fn main() {
    match run() {
        Ok(true) => println!("All tests passed"),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
