use std::{collections::BTreeMap, fmt::Display};

use crate::environment::prelude::Variables;

pub const INITIAL_GUESS: f64 = 1.0;
pub const TOLERANCE: f64 = 1e-10;
pub const MAX_ITERATIONS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Solve for this variable only, even when it has a binding.
    pub solve_for: Option<String>,
    /// Starting point of the numerical fallback.
    pub initial_guess: f64,
    pub tolerance: f64,
    /// Iteration cap for Newton-Raphson, and the pass cap for iterative systems.
    pub max_iterations: usize,
    /// Bindings layered over the explicit ones.
    pub variables: Variables,
    pub codegen: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            solve_for: None,
            initial_guess: INITIAL_GUESS,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
            variables: Variables::new(),
            codegen: true,
        }
    }
}

impl SolveOptions {
    pub fn solve_for(mut self, name: impl Into<String>) -> Self {
        self.solve_for = Some(name.into());
        self
    }

    pub fn initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// The explicit bindings with [`SolveOptions::variables`] on top.
    pub fn bindings(&self, variables: &Variables) -> Variables {
        let mut bindings = variables.clone();
        bindings.extend(self.variables.iter().map(|(name, value)| (name.clone(), *value)));

        bindings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveWarning {
    MayNotHaveConverged,
}

impl Display for SolveWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveWarning::MayNotHaveConverged => write!(f, "may not have converged"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// A plain expression, no `=`.
    Evaluated(f64),
    /// An equation without unknowns.
    Check {
        satisfied: bool,
        left: f64,
        right: f64,
    },
    Solved {
        values: BTreeMap<String, f64>,
        warning: Option<SolveWarning>,
    },
    NoSolution,
    InfiniteSolutions,
    Singular,
    Unsolvable,
}

impl Solution {
    pub fn solved(name: impl Into<String>, value: f64) -> Self {
        Self::Solved {
            values: BTreeMap::from([(name.into(), value)]),
            warning: None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        match self {
            Solution::NoSolution => Some("no solution"),
            Solution::InfiniteSolutions => Some("infinite solutions"),
            Solution::Singular => Some("no unique solution (singular matrix)"),
            Solution::Unsolvable => Some("system could not be solved with available methods"),
            _ => None
        }
    }

    pub fn warning(&self) -> Option<SolveWarning> {
        match self {
            Solution::Solved { warning, .. } => *warning,
            _ => None
        }
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        match self {
            Solution::Solved { values, .. } => values.get(name).copied(),
            _ => None
        }
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Evaluated(value) => write!(f, "{value}"),
            Solution::Check { satisfied, left, right } => {
                let relation = if *satisfied { "=" } else { "!=" };
                write!(f, "{satisfied} ({left} {relation} {right})")
            },
            Solution::Solved { values, warning } => {
                let values = values.iter()
                    .map(|(name, value)| format!("{name} = {value}"))
                    .collect::<Vec<String>>();

                write!(f, "{}", values.join(", "))?;

                match warning {
                    Some(warning) => write!(f, " ({warning})"),
                    None => Ok(())
                }
            },
            _ => write!(f, "{}", self.error().unwrap_or_default())
        }
    }
}
