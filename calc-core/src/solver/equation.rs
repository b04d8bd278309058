use std::{collections::BTreeSet, fmt::Display};

use crate::{
    environment::prelude::Variables,
    eval::prelude::evaluate,
    parser::prelude::{parse_expression, Expr}
};

use super::{
    error::SolveError,
    linear::{extract_linear_coefficients, is_linear_in, solve_linear},
    newton::solve_numerically,
    solution::{SolveOptions, Solution, TOLERANCE},
    system::solve_system
};

#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub left: Expr,
    pub right: Expr,
}

impl Equation {
    /// Unbound variables of both sides, sorted.
    pub fn unknowns(&self, variables: &Variables) -> BTreeSet<String> {
        let mut unknowns = find_unknowns(&self.left, variables);
        unknowns.extend(find_unknowns(&self.right, variables));

        unknowns
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.left.contains_variable(name) || self.right.contains_variable(name)
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

/// Splits `text` on its first `=` and parses both sides on their own.
pub fn parse_equation(text: &str) -> Result<Equation, SolveError> {
    let (left, right) = match text.split_once('=') {
        Some(sides) => sides,
        None => return Err(SolveError::NotAnEquation { text: text.to_string() })
    };

    if left.trim().is_empty() || right.trim().is_empty() {
        return Err(SolveError::EmptySide { text: text.to_string() });
    }

    let right_offset = left.len() as u32 + 1;

    let left = parse_expression(left)
        .map_err(|error| SolveError::Parse { offset: 0, error })?;
    let right = parse_expression(right)
        .map_err(|error| SolveError::Parse { offset: right_offset, error })?;

    Ok(Equation { left, right })
}

pub fn find_unknowns(expr: &Expr, variables: &Variables) -> BTreeSet<String> {
    expr.variables()
        .into_iter()
        .filter(|name| !variables.contains_key(*name))
        .map(str::to_string)
        .collect()
}

/// Solves `equation` for `variable`, every other variable taken from `bindings`.
pub fn solve_for_variable(
    equation: &Equation,
    variable: &str,
    bindings: &Variables,
    options: &SolveOptions
) -> Result<Solution, SolveError> {
    let linear = is_linear_in(&equation.left, variable) && is_linear_in(&equation.right, variable);

    if linear {
        // `1/x` passes the linearity check but fails extraction with `NonLinearTerm`
        let left = extract_linear_coefficients(&equation.left, variable, bindings)?;
        let right = extract_linear_coefficients(&equation.right, variable, bindings)?;

        return Ok(solve_linear(variable, left, right));
    }

    solve_numerically(equation, variable, bindings, options)
}

pub fn solve_equation(text: &str, variables: &Variables, options: &SolveOptions) -> Result<Solution, SolveError> {
    let equation = parse_equation(text)?;
    let mut bindings = options.bindings(variables);

    let variable = match &options.solve_for {
        Some(target) => {
            if !equation.contains_variable(target) {
                return Err(SolveError::UnknownSolveTarget { name: target.clone() });
            }

            bindings.remove(target);
            target.clone()
        },
        None => {
            let unknowns = equation.unknowns(&bindings);

            match unknowns.len() {
                0 => {
                    let left = evaluate(&equation.left, &bindings)?;
                    let right = evaluate(&equation.right, &bindings)?;

                    return Ok(Solution::Check {
                        satisfied: (left - right).abs() <= TOLERANCE,
                        left,
                        right,
                    });
                },
                1 => unknowns.into_iter().next().unwrap_or_default(),
                _ => return Err(SolveError::AmbiguousUnknowns {
                    unknowns: unknowns.into_iter().collect(),
                })
            }
        }
    };

    solve_for_variable(&equation, &variable, &bindings, options)
}

/// Evaluates a single expression, solves a single equation, or solves a system.
pub fn solve<S: AsRef<str>>(input: &[S], variables: &Variables, options: &SolveOptions) -> Result<Solution, SolveError> {
    match input {
        [] => Err(SolveError::EmptySystem),
        [text] if !text.as_ref().contains('=') => {
            let expr = parse_expression(text.as_ref())
                .map_err(|error| SolveError::Parse { offset: 0, error })?;

            Ok(Solution::Evaluated(evaluate(&expr, &options.bindings(variables))?))
        },
        [text] => solve_equation(text.as_ref(), variables, options),
        texts => solve_system(texts, variables, options)
    }
}
