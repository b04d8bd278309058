use std::collections::BTreeMap;

use crate::{
    environment::prelude::Variables,
    eval::prelude::evaluate,
    parser::prelude::{BinaryOp, Expr}
};

use super::{
    equation::Equation,
    error::SolveError,
    solution::Solution
};

/// Coefficients under this magnitude count as zero.
pub const DEGENERATE: f64 = 1e-15;

pub fn is_linear_in(expr: &Expr, variable: &str) -> bool {
    match expr {
        Expr::Number(_) | Expr::Constant(_) | Expr::Variable(_) => true,
        Expr::Unary { operand, .. } => is_linear_in(operand, variable),
        Expr::Binary { op, left, right } => match op {
            BinaryOp::Add | BinaryOp::Sub => {
                is_linear_in(left, variable) && is_linear_in(right, variable)
            },
            BinaryOp::Mul | BinaryOp::Div => {
                !(left.contains_variable(variable) && right.contains_variable(variable))
                    && is_linear_in(left, variable)
                    && is_linear_in(right, variable)
            },
            BinaryOp::Pow => !expr.contains_variable(variable),
        },
        // an opaque constant unless the variable is an argument
        Expr::Call { .. } => !expr.contains_variable(variable),
    }
}

fn non_linear(expr: &Expr, variable: &str) -> SolveError {
    SolveError::NonLinearTerm {
        variable: variable.to_string(),
        term: expr.to_string(),
    }
}

/// Rewrites `expr` as `coefficient * variable + constant`.
pub fn extract_linear_coefficients(
    expr: &Expr,
    variable: &str,
    variables: &Variables
) -> Result<(f64, f64), SolveError> {
    if !expr.contains_variable(variable) {
        return Ok((0.0, evaluate(expr, variables)?));
    }

    match expr {
        Expr::Variable(_) => Ok((1.0, 0.0)),
        Expr::Unary { operand, .. } => {
            let (coefficient, constant) = extract_linear_coefficients(operand, variable, variables)?;
            Ok((-coefficient, -constant))
        },
        Expr::Binary { op, left, right } => {
            let (a1, b1) = extract_linear_coefficients(left, variable, variables)?;
            let (a2, b2) = extract_linear_coefficients(right, variable, variables)?;

            match op {
                BinaryOp::Add => Ok((a1 + a2, b1 + b2)),
                BinaryOp::Sub => Ok((a1 - a2, b1 - b2)),
                BinaryOp::Mul if a1 == 0.0 => Ok((b1 * a2, b1 * b2)),
                BinaryOp::Mul if a2 == 0.0 => Ok((a1 * b2, b1 * b2)),
                BinaryOp::Div if a2 == 0.0 => Ok((a1 / b2, b1 / b2)),
                _ => Err(non_linear(expr, variable))
            }
        },
        _ => Err(non_linear(expr, variable))
    }
}

/// Rewrites `expr` as `cx * x + cy * y + constant`.
pub fn extract_2var_coefficients(
    expr: &Expr,
    x: &str,
    y: &str,
    variables: &Variables
) -> Result<(f64, f64, f64), SolveError> {
    if !expr.contains_variable(x) && !expr.contains_variable(y) {
        return Ok((0.0, 0.0, evaluate(expr, variables)?));
    }

    match expr {
        Expr::Variable(name) if name == x => Ok((1.0, 0.0, 0.0)),
        Expr::Variable(_) => Ok((0.0, 1.0, 0.0)),
        Expr::Unary { operand, .. } => {
            let (cx, cy, c) = extract_2var_coefficients(operand, x, y, variables)?;
            Ok((-cx, -cy, -c))
        },
        Expr::Binary { op, left, right } => {
            let (x1, y1, c1) = extract_2var_coefficients(left, x, y, variables)?;
            let (x2, y2, c2) = extract_2var_coefficients(right, x, y, variables)?;

            let left_constant = x1 == 0.0 && y1 == 0.0;
            let right_constant = x2 == 0.0 && y2 == 0.0;

            match op {
                BinaryOp::Add => Ok((x1 + x2, y1 + y2, c1 + c2)),
                BinaryOp::Sub => Ok((x1 - x2, y1 - y2, c1 - c2)),
                BinaryOp::Mul if left_constant => Ok((c1 * x2, c1 * y2, c1 * c2)),
                BinaryOp::Mul if right_constant => Ok((x1 * c2, y1 * c2, c1 * c2)),
                BinaryOp::Div if right_constant => Ok((x1 / c2, y1 / c2, c1 / c2)),
                // `x * y`, `x / y`, `2 ^ x`
                _ => Err(non_linear(expr, if expr.contains_variable(x) { x } else { y }))
            }
        },
        _ => Err(non_linear(expr, if expr.contains_variable(x) { x } else { y }))
    }
}

/// Solves `a1 * x + b1 = a2 * x + b2`.
pub fn solve_linear(variable: &str, left: (f64, f64), right: (f64, f64)) -> Solution {
    let (a1, b1) = left;
    let (a2, b2) = right;

    let coefficient = a1 - a2;

    if coefficient.abs() < DEGENERATE {
        return if (b2 - b1).abs() < DEGENERATE {
            Solution::InfiniteSolutions
        } else {
            Solution::NoSolution
        };
    }

    Solution::solved(variable, (b2 - b1) / coefficient)
}

/// Cramer's rule over two linear equations in `x` and `y`.
pub fn solve_linear_2x2(
    equations: [&Equation; 2],
    x: &str,
    y: &str,
    variables: &Variables
) -> Result<Solution, SolveError> {
    let mut rows = [(0.0, 0.0, 0.0); 2];

    for (row, equation) in rows.iter_mut().zip(equations) {
        let (lx, ly, lc) = extract_2var_coefficients(&equation.left, x, y, variables)?;
        let (rx, ry, rc) = extract_2var_coefficients(&equation.right, x, y, variables)?;

        // a * x + b * y = c
        *row = (lx - rx, ly - ry, rc - lc);
    }

    let [(a1, b1, c1), (a2, b2, c2)] = rows;
    let determinant = a1 * b2 - a2 * b1;

    if determinant.abs() < DEGENERATE {
        return Ok(Solution::Singular);
    }

    Ok(Solution::Solved {
        values: BTreeMap::from([
            (x.to_string(), (c1 * b2 - c2 * b1) / determinant),
            (y.to_string(), (a1 * c2 - a2 * c1) / determinant),
        ]),
        warning: None,
    })
}
