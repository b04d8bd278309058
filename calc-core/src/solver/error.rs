use thiserror::Error;

use crate::{analyzer::prelude::ValidationError, eval::prelude::EvalError, parser::prelude::ParseError};

/// Structural misuse of the solver. Mathematical outcomes are [`super::solution::Solution`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("`{text}` is not an equation, it has no `=`")]
    NotAnEquation {
        text: String,
    },
    #[error("one side of `{text}` is empty")]
    EmptySide {
        text: String,
    },
    /// `offset` is where the failing side starts in the equation text.
    #[error("{error}")]
    Parse {
        offset: u32,
        error: ParseError,
    },
    #[error("`{name}` does not occur in the equation")]
    UnknownSolveTarget {
        name: String,
    },
    #[error("more than one unknown ({}), pick one to solve for", unknowns.join(", "))]
    AmbiguousUnknowns {
        unknowns: Vec<String>,
    },
    #[error("`{term}` is not linear in `{variable}`")]
    NonLinearTerm {
        variable: String,
        term: String,
    },
    #[error("no equations to solve")]
    EmptySystem,
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
