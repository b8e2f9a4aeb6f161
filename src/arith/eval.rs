//! Evaluation of expression trees against a geometry snapshot.

use super::ast::{Atom, Expr, Func};
use super::EvalError;

/// Geometry facts an expression may refer to.
///
/// `x` and `y` are relative to the top-left corner of the usable area of the
/// window's head, so a top panel moves what the user sees as `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryContext {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl GeometryContext {
    /// The value an atom stands for.
    pub fn atom(&self, atom: Atom) -> f64 {
        let v = match atom {
            Atom::X => self.x,
            Atom::Y => self.y,
            Atom::Width => self.width,
            Atom::Height => self.height,
            Atom::ScreenWidth => self.screen_width,
            Atom::ScreenHeight => self.screen_height,
        };
        f64::from(v)
    }
}

impl Expr {
    /// Evaluate the tree bottom-up.
    ///
    /// Every argument is evaluated before the function's arity is checked,
    /// and the first error aborts the walk.  Division by zero follows IEEE
    /// semantics and yields an infinity rather than an error.
    pub fn eval(&self, ctx: &GeometryContext) -> Result<f64, EvalError> {
        match self {
            Expr::Const(v) => Ok(*v),
            Expr::Atom(atom) => Ok(ctx.atom(*atom)),
            Expr::Call { func, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(ctx))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                apply(*func, &values)
            }
        }
    }
}

fn apply(func: Func, values: &[f64]) -> Result<f64, EvalError> {
    let expected = func.arity();
    if !expected.accepts(values.len()) {
        return Err(EvalError::Arity {
            func,
            expected,
            got: values.len(),
        });
    }
    let result = match func {
        Func::Add => values[0] + values[1],
        Func::Sub => values[0] - values[1],
        Func::Mul => values[0] * values[1],
        Func::Div => values[0] / values[1],
        Func::Min => values[1..]
            .iter()
            .fold(values[0], |acc, &v| if v < acc { v } else { acc }),
        Func::Max => values[1..]
            .iter()
            .fold(values[0], |acc, &v| if v > acc { v } else { acc }),
    };
    Ok(result)
}
