pub mod error;
pub mod solution;
pub mod equation;
pub mod linear;
pub mod newton;
pub mod system;

pub mod prelude {
    pub use super::{
        error::*,
        solution::*,
        equation::*,
        linear::*,
        newton::*,
        system::*
    };
}

#[cfg(test)]
mod tests;
