//! Recursive-descent parser for placement expressions.
//!
//! ```text
//! expr      := funcall | constant | atom
//! funcall   := '(' func-name expr* ')'
//! func-name := '+' | '-' | '*' | '/' | 'min' | 'max'
//! atom      := 'x' | 'y' | 'w' | 'h' | 'sw' | 'sh'
//! constant  := decimal floating-point literal
//! ```
//!
//! The first non-whitespace character picks the production: `(` starts a
//! call, an ASCII digit starts a constant, anything else is an atom.

use super::ast::{Atom, Expr, Func};
use super::lexer::scan_token;
use super::ParseError;

/// Parse a complete expression.
///
/// Anything other than whitespace after the expression is rejected.
pub fn parse(src: &str) -> Result<Expr, ParseError> {
    let (expr, rest) = parse_expr(src)?;
    let rest = rest.trim();
    if !rest.is_empty() {
        return Err(ParseError::TrailingJunk(rest.to_string()));
    }
    Ok(expr)
}

/// Parse one expression off the front of `src`, returning it together with
/// the unconsumed remainder.
pub fn parse_expr(src: &str) -> Result<(Expr, &str), ParseError> {
    let src = src.trim();
    match src.chars().next() {
        None => Err(ParseError::UnexpectedEnd),
        Some('(') => parse_call(&src[1..]),
        Some(')') => Err(ParseError::UnexpectedChar(')')),
        Some(c) if c.is_ascii_digit() => parse_const(src),
        Some(_) => parse_atom(src),
    }
}

/// `src` starts just after the opening parenthesis.
fn parse_call(src: &str) -> Result<(Expr, &str), ParseError> {
    let (name, mut rest) = scan_token(src)?;
    let func =
        Func::from_symbol(name).ok_or_else(|| ParseError::UnknownFunction(name.to_string()))?;

    let mut args = Vec::new();
    loop {
        match rest.chars().next() {
            None => return Err(ParseError::UnexpectedEnd),
            Some(')') => {
                rest = rest[1..].trim();
                break;
            }
            Some(_) => {
                let (arg, after) = parse_expr(rest)?;
                args.push(arg);
                rest = after;
            }
        }
    }
    Ok((Expr::Call { func, args }, rest))
}

fn parse_atom(src: &str) -> Result<(Expr, &str), ParseError> {
    let (name, rest) = scan_token(src)?;
    let atom = Atom::from_symbol(name).ok_or_else(|| ParseError::UnknownAtom(name.to_string()))?;
    Ok((Expr::Atom(atom), rest))
}

fn parse_const(src: &str) -> Result<(Expr, &str), ParseError> {
    let (token, rest) = scan_token(src)?;
    let value = token.parse::<f64>().map_err(|source| ParseError::BadNumber {
        token: token.to_string(),
        source,
    })?;
    Ok((Expr::Const(value), rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(func: Func, args: Vec<Expr>) -> Expr {
        Expr::Call { func, args }
    }

    #[test]
    fn parses_atoms_and_constants() {
        assert_eq!(parse("sw").unwrap(), Expr::Atom(Atom::ScreenWidth));
        assert_eq!(parse(" 12.5 ").unwrap(), Expr::Const(12.5));
        assert_eq!(parse("1e3").unwrap(), Expr::Const(1000.0));
    }

    #[test]
    fn parses_nested_calls() {
        let expr = parse("(+ x (/ sw 2))").unwrap();
        assert_eq!(
            expr,
            call(
                Func::Add,
                vec![
                    Expr::Atom(Atom::X),
                    call(Func::Div, vec![Expr::Atom(Atom::ScreenWidth), Expr::Const(2.0)]),
                ]
            )
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        let tight = parse("(max(+ w 1)h)").unwrap();
        let loose = parse("\n( max  ( + w 1 )\t h )  ").unwrap();
        assert_eq!(tight, loose);
    }

    #[test]
    fn variadic_calls_keep_argument_order() {
        let expr = parse("(min w h sw)").unwrap();
        assert_eq!(
            expr,
            call(
                Func::Min,
                vec![
                    Expr::Atom(Atom::Width),
                    Expr::Atom(Atom::Height),
                    Expr::Atom(Atom::ScreenWidth),
                ]
            )
        );
    }

    #[test]
    fn arity_is_not_checked_when_parsing() {
        assert_eq!(parse("(+ x)").unwrap(), call(Func::Add, vec![Expr::Atom(Atom::X)]));
        assert_eq!(parse("(max)").unwrap(), call(Func::Max, vec![]));
    }

    #[test]
    fn parse_expr_returns_remainder() {
        let (expr, rest) = parse_expr("(* 2 w) tail").unwrap();
        assert_eq!(expr, call(Func::Mul, vec![Expr::Const(2.0), Expr::Atom(Atom::Width)]));
        assert_eq!(rest, "tail");
    }

    #[test]
    fn unknown_atom_is_rejected() {
        assert_eq!(
            parse("(+ x foo)"),
            Err(ParseError::UnknownAtom("foo".into()))
        );
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert_eq!(
            parse("(mod x 2)"),
            Err(ParseError::UnknownFunction("mod".into()))
        );
    }

    #[test]
    fn unclosed_call_is_unexpected_end() {
        assert_eq!(parse("(+ x 1"), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse("("), Err(ParseError::UnexpectedEnd));
        assert_eq!(parse(""), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn bad_number_is_rejected() {
        match parse("(+ 1.2.3 x)") {
            Err(ParseError::BadNumber { token, .. }) => assert_eq!(token, "1.2.3"),
            other => panic!("expected BadNumber, got {:?}", other),
        }
    }

    #[test]
    fn stray_close_paren_is_rejected() {
        assert_eq!(parse(")"), Err(ParseError::UnexpectedChar(')')));
    }

    #[test]
    fn trailing_junk_is_rejected() {
        assert_eq!(
            parse("(+ x 1) y"),
            Err(ParseError::TrailingJunk("y".into()))
        );
        assert_eq!(parse("x)"), Err(ParseError::TrailingJunk(")".into())));
    }

    #[test]
    fn negative_literals_are_not_constants() {
        assert_eq!(parse("-5"), Err(ParseError::UnknownAtom("-5".into())));
    }
}
