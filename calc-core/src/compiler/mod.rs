pub mod error;
pub mod compiler;

pub mod prelude {
    pub use super::{
        compiler::*,
        error::*
    };
}

#[cfg(test)]
mod tests;
