use crate::expr::ast::{BinaryOp, Expr, Function, UnaryOp};
use crate::expr::error::FormulaError;
use crate::expr::parser::parse_expr;

/// A compiled time formula.
///
/// All name and arity resolution happens in [`Formula::compile`];
/// [`Formula::eval`] is deterministic, side-effect-free and cannot fail
/// (IEEE-754 semantics apply, so e.g. `1 / 0` evaluates to infinity).
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: Expr,
}

impl Formula {
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        let root = parse_expr(source)?;
        Ok(Self {
            source: source.to_owned(),
            root,
        })
    }

    /// The original formula text, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn eval(&self, time: f32) -> f32 {
        eval_expr(&self.root, time)
    }
}

fn eval_expr(e: &Expr, time: f32) -> f32 {
    match e {
        Expr::Lit(v) => *v,
        Expr::Time => time,
        Expr::Unary {
            op: UnaryOp::Neg,
            expr,
        } => -eval_expr(expr, time),
        Expr::Binary { op, left, right } => {
            let l = eval_expr(left, time);
            let r = eval_expr(right, time);
            match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Rem => l % r,
            }
        }
        Expr::Call { func, args } => match func {
            Function::Sin => eval_expr(&args[0], time).sin(),
            Function::Cos => eval_expr(&args[0], time).cos(),
            Function::Abs => eval_expr(&args[0], time).abs(),
            Function::Min => eval_expr(&args[0], time).min(eval_expr(&args[1], time)),
            Function::Max => eval_expr(&args[0], time).max(eval_expr(&args[1], time)),
        },
    }
}
