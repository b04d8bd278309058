use std::fmt::Display;

use crate::{
    analyzer::prelude::{validate, ValidationError},
    environment::prelude::Variables,
    eval::prelude::{evaluate, EvalError},
    parser::prelude::Expr
};

use super::error::CodegenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Interpreted,
    Jit,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Interpreted => write!(f, "interpreted"),
            Strategy::Jit => write!(f, "jit"),
        }
    }
}

/// A reusable callable over numeric bindings.
///
/// Every implementation returns the same value and the same error as [`evaluate`]
/// for a validated tree.
pub trait Evaluate {
    fn evaluate(&self, variables: &Variables) -> Result<f64, EvalError>;

    fn strategy(&self) -> Strategy;
}

/// Tree-walking strategy, always available.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpreted {
    expr: Expr,
}

impl Interpreted {
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }
}

impl Evaluate for Interpreted {
    fn evaluate(&self, variables: &Variables) -> Result<f64, EvalError> {
        evaluate(&self.expr, variables)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Interpreted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Try native code generation before falling back to the interpreter.
    pub codegen: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { codegen: true }
    }
}

pub struct Compiled {
    expr: Expr,
    inner: Box<dyn Evaluate>,
}

impl Compiled {
    pub fn evaluate(&self, variables: &Variables) -> Result<f64, EvalError> {
        self.inner.evaluate(variables)
    }

    pub fn strategy(&self) -> Strategy {
        self.inner.strategy()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl std::fmt::Debug for Compiled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiled")
            .field("expr", &self.expr)
            .field("strategy", &self.strategy())
            .finish()
    }
}

#[cfg(feature = "compiler")]
fn jit(expr: &Expr) -> Result<Box<dyn Evaluate>, CodegenError> {
    use crate::codegen::prelude::Jit;

    Jit::compile(expr).map(|jit| Box::new(jit) as Box<dyn Evaluate>)
}

#[cfg(not(feature = "compiler"))]
fn jit(_expr: &Expr) -> Result<Box<dyn Evaluate>, CodegenError> {
    Err(CodegenError::Unavailable)
}

pub fn compile(expr: &Expr) -> Result<Compiled, ValidationError> {
    compile_with(expr, CompileOptions::default())
}

/// Validates `expr` and builds a callable, preferring generated code.
///
/// A code generation failure is not an error here, the interpreter takes over.
pub fn compile_with(expr: &Expr, options: CompileOptions) -> Result<Compiled, ValidationError> {
    validate(expr)?;

    let generated = match options.codegen {
        true => jit(expr),
        false => Err(CodegenError::Unavailable),
    };

    let inner = generated
        .unwrap_or_else(|_| Box::new(Interpreted::new(expr.clone())));

    Ok(Compiled {
        expr: expr.clone(),
        inner,
    })
}
