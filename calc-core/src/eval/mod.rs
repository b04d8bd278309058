
pub mod builtins;
pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        evaluate,
        evaluate_in,
        evaluate_lazy,
        evaluate_str,
        Scope
    };
}

use crate::{
    environment::prelude::{Environment, Variables},
    parser::prelude::{parse_expression, Expr}
};
use error::EvalError;

/// Where variable references get their values from.
pub trait Scope {
    fn value_of(&self, name: &str) -> Result<f64, EvalError>;
}

impl Scope for Variables {
    fn value_of(&self, name: &str) -> Result<f64, EvalError> {
        self.get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable { name: name.to_string() })
    }
}

pub fn evaluate(expr: &Expr, variables: &Variables) -> Result<f64, EvalError> {
    evaluate_in(expr, variables)
}

/// Evaluates against raw bindings; the resolution memo lives for this call only.
pub fn evaluate_lazy(expr: &Expr, env: &Environment) -> Result<f64, EvalError> {
    env.evaluate(expr)
}

pub fn evaluate_str(src: &str, variables: &Variables) -> Result<f64, EvalError> {
    let expr = parse_expression(src)
        .map_err(|error| EvalError::Parse { name: src.to_string(), error })?;

    evaluate(&expr, variables)
}

pub fn evaluate_in<S: Scope + ?Sized>(expr: &Expr, scope: &S) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Constant(constant) => Ok(constant.value()),
        Expr::Variable(name) => scope.value_of(name),
        Expr::Binary { op, left, right } => {
            let left = evaluate_in(left, scope)?;
            let right = evaluate_in(right, scope)?;

            Ok(op.apply(left, right))
        },
        Expr::Unary { op, operand } => Ok(op.apply(evaluate_in(operand, scope)?)),
        Expr::Call { function, args } => {
            let args = args.iter()
                .map(|arg| evaluate_in(arg, scope))
                .collect::<Result<Vec<f64>, EvalError>>()?;

            builtins::call(*function, &args)
        }
    }
}
