pub mod codegen;
pub mod jit;
pub mod variable;

pub mod prelude {
    pub use super::{
        codegen::*,
        jit::*,
        variable::*
    };
}

#[cfg(test)]
mod tests;
