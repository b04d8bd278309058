use std::{collections::HashMap, fmt::Debug, rc::Rc};

use crate::eval::prelude::EvalError;

use super::environment::Environment;

/// Plain numeric bindings, the environment of a single evaluation.
pub type Variables = HashMap<String, f64>;

/// Host-provided computation over the values resolved so far.
pub type Callable = Rc<dyn Fn(&Variables) -> Result<f64, EvalError>>;

/// What a scoped binding evaluates once its locals are resolved.
#[derive(Clone)]
pub enum Body {
    Expression(String),
    Callable(Callable),
}

/// A raw, unevaluated binding.
#[derive(Clone)]
pub enum Binding {
    Number(f64),
    /// Expression text, parsed and evaluated on first use.
    Expression(String),
    /// A body evaluated in a child scope that sees `locals` before anything else.
    Scoped {
        body: Body,
        locals: Environment,
    },
    Callable(Callable),
}

impl Binding {
    pub fn expression(src: impl Into<String>) -> Self {
        Self::Expression(src.into())
    }

    pub fn scoped(src: impl Into<String>, locals: Environment) -> Self {
        Self::Scoped {
            body: Body::Expression(src.into()),
            locals,
        }
    }

    pub fn callable(f: impl Fn(&Variables) -> Result<f64, EvalError> + 'static) -> Self {
        Self::Callable(Rc::new(f))
    }
}

impl From<f64> for Binding {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Binding {
    fn from(src: &str) -> Self {
        Self::Expression(src.to_string())
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Expression(src) => f.debug_tuple("Expression").field(src).finish(),
            Body::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Binding::Expression(src) => f.debug_tuple("Expression").field(src).finish(),
            Binding::Scoped { body, locals } => f.debug_struct("Scoped")
                .field("body", body)
                .field("locals", locals)
                .finish(),
            Binding::Callable(_) => write!(f, "Callable(..)"),
        }
    }
}
