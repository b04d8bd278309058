use crate::{
    compiler::prelude::{compile_with, CompileOptions},
    environment::prelude::Variables,
    eval::prelude::EvalError,
    parser::prelude::{BinaryOp, Expr}
};

use super::{
    equation::Equation,
    error::SolveError,
    linear::DEGENERATE,
    solution::{SolveOptions, SolveWarning, Solution}
};

/// Step of the central-difference derivative.
pub const DERIVATIVE_STEP: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub value: f64,
    pub converged: bool,
}

/// Newton-Raphson from `initial_guess`.
///
/// A flat derivative nudges the iterate by +1 instead of dividing by it.
/// Running out of iterations is not an error: the last iterate comes back unconverged.
pub fn newton_raphson<F>(
    mut f: F,
    initial_guess: f64,
    tolerance: f64,
    max_iterations: usize
) -> Result<Root, EvalError>
where
    F: FnMut(f64) -> Result<f64, EvalError>
{
    let mut x = initial_guess;

    for _ in 0..max_iterations {
        let fx = f(x)?;

        if fx.abs() < tolerance {
            return Ok(Root { value: x, converged: true });
        }

        let derivative = (f(x + DERIVATIVE_STEP)? - f(x - DERIVATIVE_STEP)?) / (2.0 * DERIVATIVE_STEP);

        if derivative.abs() < DEGENERATE {
            x += 1.0;
            continue;
        }

        let next = x - fx / derivative;

        if (next - x).abs() < tolerance {
            return Ok(Root { value: next, converged: true });
        }

        x = next;
    }

    Ok(Root { value: x, converged: false })
}

/// Numerical fallback: finds a root of `left - right` in `variable`.
pub fn solve_numerically(
    equation: &Equation,
    variable: &str,
    bindings: &Variables,
    options: &SolveOptions
) -> Result<Solution, SolveError> {
    let difference = Expr::binary(BinaryOp::Sub, equation.left.clone(), equation.right.clone());
    let compiled = compile_with(&difference, CompileOptions { codegen: options.codegen })?;

    let mut scope = bindings.clone();

    let root = newton_raphson(
        |x| {
            scope.insert(variable.to_string(), x);
            compiled.evaluate(&scope)
        },
        options.initial_guess,
        options.tolerance,
        options.max_iterations
    )?;

    Ok(Solution::Solved {
        values: [(variable.to_string(), root.value)].into_iter().collect(),
        warning: (!root.converged).then_some(SolveWarning::MayNotHaveConverged),
    })
}
