pub mod markup;

pub mod prelude {
    pub use super::markup::*;
}

#[cfg(test)]
mod tests;
