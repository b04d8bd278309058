use thiserror::Error;

use crate::lexer::prelude::{Arity, Function};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Occurs when a variable name does not match `[A-Za-z_][A-Za-z0-9_]*`.
    ///
    /// Only reachable through hand-built trees, the lexer never produces such a name.
    #[error("invalid variable name `{name}`")]
    InvalidVariableName {
        name: String,
    },
    /// Occurs when a builtin is called with the wrong number of arguments.
    ///
    /// Example:
    /// ```text
    /// atan2(1) <- `atan2` takes 2 arguments, got 1
    /// ```
    #[error("`{function}` takes {expected} argument(s), got {got}")]
    ArityMismatch {
        function: Function,
        expected: Arity,
        got: usize,
    },
    #[error("unknown function `{name}`")]
    UnknownFunction {
        name: String,
    },
    #[error("unknown constant `{name}`")]
    UnknownConstant {
        name: String,
    },
    #[error("unknown operator `{symbol}`")]
    UnknownOperator {
        symbol: String,
    },
}
