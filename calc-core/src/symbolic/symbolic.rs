use std::collections::HashMap;

use crate::parser::prelude::{parse_expression, Expr, ParseError};

/// What a variable is replaced with by [`substitute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Source text, parsed (markup included) before it is spliced in.
    Text(String),
    Number(f64),
    Expr(Expr),
}

impl Replacement {
    fn into_expr(self) -> Result<Expr, ParseError> {
        match self {
            Replacement::Text(text) => parse_expression(&text),
            Replacement::Number(value) => Ok(Expr::Number(value)),
            Replacement::Expr(expr) => Ok(expr),
        }
    }
}

impl From<f64> for Replacement {
    fn from(value: f64) -> Self {
        Replacement::Number(value)
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Replacement::Text(text.to_string())
    }
}

impl From<Expr> for Replacement {
    fn from(expr: Expr) -> Self {
        Replacement::Expr(expr)
    }
}

/// Replaces every variable named in `replacements`, leaving the others alone.
///
/// Replacements are not substituted into each other, so `{x: "y", y: "x"}` swaps.
pub fn substitute(expr: &Expr, replacements: &HashMap<String, Replacement>) -> Result<Expr, ParseError> {
    let replacements = replacements.iter()
        .map(|(name, replacement)| Ok((name.as_str(), replacement.clone().into_expr()?)))
        .collect::<Result<HashMap<&str, Expr>, ParseError>>()?;

    Ok(replace(expr, &replacements))
}

fn replace(expr: &Expr, replacements: &HashMap<&str, Expr>) -> Expr {
    match expr {
        Expr::Variable(name) => match replacements.get(name.as_str()) {
            Some(replacement) => replacement.clone(),
            None => expr.clone()
        },
        Expr::Binary { op, left, right } => {
            Expr::binary(*op, replace(left, replacements), replace(right, replacements))
        },
        Expr::Unary { op, operand } => Expr::Unary {
            op: *op,
            operand: Box::new(replace(operand, replacements)),
        },
        Expr::Call { function, args } => Expr::call(
            *function,
            args.iter().map(|arg| replace(arg, replacements)).collect()
        ),
        Expr::Number(_) | Expr::Constant(_) => expr.clone()
    }
}

/// Minimal-parenthesis source text for `expr`. Parsing it back gives the same value,
/// though a negative literal comes back as a negation.
pub fn to_string(expr: &Expr) -> String {
    expr.to_string()
}
