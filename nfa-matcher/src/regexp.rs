use std::fmt::{self, Display};

/// A word: a finite sequence of 8-bit symbols
pub type Word = Vec<u8>;

/// Regular expression tree over byte symbols
///
/// Every composite node owns its children, so the expression is always a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegExp {
    /// `L + R`
    Alternation(Box<RegExp>, Box<RegExp>),
    /// `L R`
    Concatenation(Box<RegExp>, Box<RegExp>),
    /// `N*`, zero or more repetitions
    Iteration(Box<RegExp>),
    /// A single symbol
    Symbol(u8),
    /// The language containing only the empty word
    Epsilon,
    /// The empty language
    Empty,
}

impl RegExp {
    pub fn alt(left: RegExp, right: RegExp) -> Self {
        RegExp::Alternation(Box::new(left), Box::new(right))
    }

    pub fn concat(left: RegExp, right: RegExp) -> Self {
        RegExp::Concatenation(Box::new(left), Box::new(right))
    }

    pub fn star(node: RegExp) -> Self {
        RegExp::Iteration(Box::new(node))
    }

    pub fn symbol(c: u8) -> Self {
        RegExp::Symbol(c)
    }

    pub fn epsilon() -> Self {
        RegExp::Epsilon
    }

    pub fn empty() -> Self {
        RegExp::Empty
    }

    /// Nesting depth of the tree. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            RegExp::Alternation(l, r) | RegExp::Concatenation(l, r) => 1 + l.depth().max(r.depth()),
            RegExp::Iteration(n) => 1 + n.depth(),
            RegExp::Symbol(_) | RegExp::Epsilon | RegExp::Empty => 1,
        }
    }
}

impl Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegExp::Alternation(l, r) => write!(f, "({l}+{r})"),
            RegExp::Concatenation(l, r) => write!(f, "({l} {r})"),
            RegExp::Iteration(n) => write!(f, "({n})*"),
            RegExp::Symbol(c) if c.is_ascii_graphic() => write!(f, "{}", *c as char),
            RegExp::Symbol(c) => write!(f, "0x{c:x}"),
            RegExp::Epsilon => write!(f, "#E"),
            RegExp::Empty => write!(f, "#0"),
        }
    }
}

/// Renders a word as `"a b 0x7"`
///
/// Printable ASCII is shown as is, everything else in hexadecimal.
pub struct DisplayWord<'a>(pub &'a [u8]);

impl Display for DisplayWord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for (i, c) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            if c.is_ascii_graphic() || *c == b' ' {
                write!(f, "{}", *c as char)?;
            } else {
                write!(f, "0x{c:x}")?;
            }
        }
        write!(f, "\"")
    }
}
