use crate::parser::prelude::Expr;

use super::error::ValidationError;

pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        },
        _ => false
    }
}

/// Walks a tree and records every whitelist violation in source order.
#[derive(Debug, Default)]
pub struct Validator {
    problems: Vec<ValidationError>,
}

impl Validator {
    pub fn analyze(expr: &Expr) -> Vec<ValidationError> {
        let mut validator = Validator::default();
        validator.analyze_expr(expr);

        validator.problems
    }

    fn analyze_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Number(_) | Expr::Constant(_) => {},
            Expr::Variable(name) => {
                if !is_valid_identifier(name) {
                    self.problems.push(ValidationError::InvalidVariableName { name: name.clone() });
                }
            },
            Expr::Binary { left, right, .. } => {
                self.analyze_expr(left);
                self.analyze_expr(right);
            },
            Expr::Unary { operand, .. } => self.analyze_expr(operand),
            Expr::Call { function, args } => {
                let arity = function.arity();

                if !arity.accepts(args.len()) {
                    self.problems.push(ValidationError::ArityMismatch {
                        function: *function,
                        expected: arity,
                        got: args.len(),
                    });
                }

                args.iter().for_each(|arg| self.analyze_expr(arg));
            }
        }
    }
}

/// Rejects the first node outside the builtin whitelist.
pub fn validate(expr: &Expr) -> Result<(), ValidationError> {
    match Validator::analyze(expr).into_iter().next() {
        Some(error) => Err(error),
        None => Ok(())
    }
}
