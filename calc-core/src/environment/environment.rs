use std::{cell::RefCell, collections::{HashMap, HashSet}};

use crate::{
    eval::prelude::{evaluate_in, EvalError, Scope},
    parser::prelude::{parse_expression, Expr}
};

use super::value::{Binding, Body, Variables};

/// Lazy bindings, resolved on demand by a [`Resolver`].
#[derive(Default, Debug, Clone)]
pub struct Environment {
    pub store: HashMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.store.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        self.store.insert(name.into(), binding.into());
    }

    pub fn with(mut self, name: impl Into<String>, binding: impl Into<Binding>) -> Self {
        self.set(name, binding);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Binding> {
        self.store.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Evaluates `expr` with a fresh memo that is dropped on return.
    pub fn evaluate(&self, expr: &Expr) -> Result<f64, EvalError> {
        evaluate_in(expr, &Resolver::new(self))
    }

    pub fn resolve(&self, name: &str) -> Result<f64, EvalError> {
        Resolver::new(self).value_of(name)
    }

    /// Resolves every binding within a single memo.
    pub fn resolve_all(&self) -> Result<Variables, EvalError> {
        let resolver = Resolver::new(self);
        resolver.resolve_locals()?;

        Ok(resolver.snapshot())
    }
}

impl From<&Variables> for Environment {
    fn from(variables: &Variables) -> Self {
        let store = variables.iter()
            .map(|(name, value)| (name.clone(), Binding::Number(*value)))
            .collect();

        Self { store }
    }
}

/// Per-call resolution state: a memo of resolved names and the names being resolved.
///
/// A scoped binding gets a child resolver whose own environment is searched first.
/// Lookups that miss fall through to the parent.
pub struct Resolver<'a> {
    env: &'a Environment,
    parent: Option<&'a Resolver<'a>>,
    memo: RefCell<Variables>,
    in_progress: RefCell<HashSet<String>>,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self {
            env,
            parent: None,
            memo: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
        }
    }

    fn child(env: &'a Environment, parent: &'a Resolver<'a>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(env)
        }
    }

    /// Every value resolved so far, inner scopes shadowing outer ones.
    pub fn snapshot(&self) -> Variables {
        let mut values = match self.parent {
            Some(parent) => parent.snapshot(),
            None => HashMap::new(),
        };

        values.extend(self.memo.borrow().iter().map(|(name, value)| (name.clone(), *value)));

        values
    }

    fn resolve_locals(&self) -> Result<(), EvalError> {
        let mut names = self.env.store.keys().collect::<Vec<&String>>();
        names.sort();

        for name in names {
            let _ = self.value_of(name)?;
        }

        Ok(())
    }

    fn resolve_binding(&self, name: &str, binding: &Binding) -> Result<f64, EvalError> {
        if !self.in_progress.borrow_mut().insert(name.to_string()) {
            return Err(EvalError::CircularReference { name: name.to_string() });
        }

        let value = self.compute(name, binding);

        self.in_progress.borrow_mut().remove(name);

        let value = value?;
        self.memo.borrow_mut().insert(name.to_string(), value);

        Ok(value)
    }

    fn compute(&self, name: &str, binding: &Binding) -> Result<f64, EvalError> {
        match binding {
            Binding::Number(value) => Ok(*value),
            Binding::Expression(src) => self.evaluate_source(name, src),
            Binding::Scoped { body, locals } => {
                let scope = Resolver::child(locals, self);
                scope.resolve_locals()?;

                match body {
                    Body::Expression(src) => scope.evaluate_source(name, src),
                    Body::Callable(f) => f(&scope.snapshot()),
                }
            },
            Binding::Callable(f) => f(&self.snapshot()),
        }
    }

    fn evaluate_source(&self, name: &str, src: &str) -> Result<f64, EvalError> {
        let expr = parse_expression(src)
            .map_err(|error| EvalError::Parse { name: name.to_string(), error })?;

        evaluate_in(&expr, self)
    }
}

impl Scope for Resolver<'_> {
    fn value_of(&self, name: &str) -> Result<f64, EvalError> {
        if let Some(value) = self.memo.borrow().get(name) {
            return Ok(*value);
        }

        match (self.env.get(name), self.parent) {
            (Some(binding), _) => self.resolve_binding(name, binding),
            (None, Some(parent)) => parent.value_of(name),
            (None, None) => Err(EvalError::UndefinedVariable { name: name.to_string() }),
        }
    }
}
