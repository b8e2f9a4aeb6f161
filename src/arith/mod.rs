//! Placement expressions.
//!
//! Users describe a target coordinate or size as a prefix s-expression over
//! the window's and screen's current geometry:
//!
//! ```text
//! (+ x (/ sw 2))        window x plus half the screen width
//! (min w (- sw 10))     current width, capped at screen width minus 10
//! ```
//!
//! | Kind      | Symbols                                  |
//! |-----------|------------------------------------------|
//! | Functions | `+` `-` `*` `/` (binary), `min` `max` (2+) |
//! | Atoms     | `x` `y` `w` `h` `sw` `sh`                |
//! | Constants | decimal floating-point literals          |
//!
//! Text is turned into an [`Expr`] by [`parse`], and an [`Expr`] is turned
//! into a number by [`Expr::eval`] against a [`GeometryContext`].

pub mod ast;
pub mod eval;
mod lexer;
pub mod parser;

pub use ast::{Arity, Atom, Expr, Func};
pub use eval::GeometryContext;
pub use parser::parse;

use std::num::ParseFloatError;

/// Malformed expression text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("reached end of expression unexpectedly")]
    UnexpectedEnd,
    #[error("unrecognized function: {0}")]
    UnknownFunction(String),
    #[error("bad atom: {0}")]
    UnknownAtom(String),
    #[error("bad number {token:?}: {source}")]
    BadNumber {
        token: String,
        source: ParseFloatError,
    },
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("trailing junk after arithmetic expression: {0:?}")]
    TrailingJunk(String),
}

/// A tree that parsed but cannot be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("{func} expects {expected} arguments, got {got}")]
    Arity {
        func: Func,
        expected: Arity,
        got: usize,
    },
}
