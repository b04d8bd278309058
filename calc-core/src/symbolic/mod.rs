pub mod symbolic;

pub mod prelude {
    pub use super::symbolic::*;
}
