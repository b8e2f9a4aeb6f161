//! Syntax tree for placement expressions.
//!
//! The vocabulary is closed: six functions and six atoms.  Both are plain
//! enums with a fixed symbol table, so lookups in either direction are pure
//! functions rather than a registry built at start-up.

use std::fmt;

/// A parsed expression.
///
/// Trees are immutable once built.  Arity is **not** validated here; a call
/// with the wrong number of arguments parses fine and only fails when
/// [evaluated](Expr::eval).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `(func arg...)`
    Call { func: Func, args: Vec<Expr> },
    /// A live geometry value such as `sw`.
    Atom(Atom),
    /// A numeric literal.
    Const(f64),
}

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
}

/// How many arguments a [`Func`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    /// Whether `n` arguments satisfy this arity.
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "{}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

const FUNCS: [(Func, &str); 6] = [
    (Func::Add, "+"),
    (Func::Sub, "-"),
    (Func::Mul, "*"),
    (Func::Div, "/"),
    (Func::Min, "min"),
    (Func::Max, "max"),
];

impl Func {
    /// The symbol used for this function in expression text.
    pub fn symbol(self) -> &'static str {
        FUNCS
            .iter()
            .find(|(func, _)| *func == self)
            .map(|(_, sym)| *sym)
            .unwrap_or("?")
    }

    /// Look a function up by its symbol.
    pub fn from_symbol(symbol: &str) -> Option<Func> {
        FUNCS
            .iter()
            .find(|(_, sym)| *sym == symbol)
            .map(|(func, _)| *func)
    }

    pub fn arity(self) -> Arity {
        match self {
            Func::Add | Func::Sub | Func::Mul | Func::Div => Arity::Exactly(2),
            Func::Min | Func::Max => Arity::AtLeast(2),
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Named geometry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Atom {
    /// `x`: window left edge, relative to its head.
    X,
    /// `y`: window top edge, relative to its head.
    Y,
    /// `w`: window width.
    Width,
    /// `h`: window height.
    Height,
    /// `sw`: usable width of the window's head.
    ScreenWidth,
    /// `sh`: usable height of the window's head.
    ScreenHeight,
}

const ATOMS: [(Atom, &str); 6] = [
    (Atom::X, "x"),
    (Atom::Y, "y"),
    (Atom::Width, "w"),
    (Atom::Height, "h"),
    (Atom::ScreenWidth, "sw"),
    (Atom::ScreenHeight, "sh"),
];

impl Atom {
    pub fn symbol(self) -> &'static str {
        ATOMS
            .iter()
            .find(|(atom, _)| *atom == self)
            .map(|(_, sym)| *sym)
            .unwrap_or("?")
    }

    pub fn from_symbol(symbol: &str) -> Option<Atom> {
        ATOMS
            .iter()
            .find(|(_, sym)| *sym == symbol)
            .map(|(atom, _)| *atom)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Renders the tree back into s-expression text that parses to an
/// equivalent tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Call { func, args } => {
                write!(f, "({}", func)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Atom(atom) => write!(f, "{}", atom),
            // An overflowing literal is the only way to spell infinity.
            Expr::Const(v) if v.is_infinite() => f.write_str("1e999"),
            Expr::Const(v) => write!(f, "{}", v),
        }
    }
}
