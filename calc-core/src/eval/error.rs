use thiserror::Error;

use crate::{lexer::prelude::{Arity, Function}, parser::prelude::ParseError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined variable `{name}`")]
    UndefinedVariable {
        name: String,
    },
    #[error("`{function}` takes {expected} argument(s), got {got}")]
    ArityMismatch {
        function: Function,
        expected: Arity,
        got: usize,
    },
    /// A lazy binding that needs its own value to resolve.
    #[error("circular reference while resolving `{name}`")]
    CircularReference {
        name: String,
    },
    /// The expression text bound to `name` does not parse.
    #[error("binding `{name}` does not parse: {error}")]
    Parse {
        name: String,
        error: ParseError,
    },
}
