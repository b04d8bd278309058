pub mod lexer;
pub mod markup;
pub mod parser;
pub mod analyzer;
pub mod environment;
pub mod eval;
pub mod compiler;
#[cfg(feature = "compiler")]
pub mod codegen;
pub mod solver;
pub mod symbolic;
pub mod utils;
