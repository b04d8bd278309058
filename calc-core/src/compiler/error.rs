use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("code generation is not available in this build")]
    Unavailable,
    #[error("failed to initialize the native target: {0}")]
    Target(String),
    #[error("failed to build instruction: {0}")]
    Builder(String),
    #[error("generated function `{0}` failed verification")]
    InvalidFunction(String),
    #[error("failed to create execution engine: {0}")]
    Engine(String),
    #[error("failed to look up compiled function: {0}")]
    Lookup(String),
}
