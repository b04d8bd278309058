use std::{cell::Cell, rc::Rc};

use crate::{
    eval::prelude::{evaluate_lazy, EvalError},
    parser::prelude::parse_str
};

use super::prelude::{Binding, Body, Environment, Variables};

#[test]
fn test_expression_bindings() -> Result<(), EvalError> {
    let env = Environment::new()
        .with("r", 2.0)
        .with("area", "pi * r^2")
        .with("double_area", "2 * area");

    let value = env.resolve("double_area")?;
    assert!((value - 8.0 * std::f64::consts::PI).abs() < 1e-12);

    let expr = parse_str("area / r").map_err(|error| EvalError::Parse { name: "expr".into(), error })?;
    assert!((evaluate_lazy(&expr, &env)? - 2.0 * std::f64::consts::PI).abs() < 1e-12);

    Ok(())
}

#[test]
fn test_memo_resolves_each_binding_once() -> Result<(), EvalError> {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();

    let env = Environment::new()
        .with("slow", Binding::callable(move |_| {
            counter.set(counter.get() + 1);
            Ok(10.0)
        }))
        .with("a", "slow + 1")
        .with("b", "slow * a");

    assert_eq!(env.resolve("b")?, 110.0);
    assert_eq!(calls.get(), 1);

    // a fresh call gets a fresh memo
    assert_eq!(env.resolve("b")?, 110.0);
    assert_eq!(calls.get(), 2);

    Ok(())
}

#[test]
fn test_callable_sees_resolved_values() -> Result<(), EvalError> {
    let env = Environment::new()
        .with("x", 3.0)
        .with("y", "x + 1")
        .with("sum", Binding::callable(|values: &Variables| {
            Ok(values.values().sum())
        }))
        .with("total", "y + sum");

    // `y` resolves first, so the callable sees both `x` and `y`
    assert_eq!(env.resolve("total")?, 4.0 + 7.0);

    Ok(())
}

#[test]
fn test_scoped_bindings() -> Result<(), EvalError> {
    let locals = Environment::new()
        .with("x", 5.0)
        .with("k", "x * 2");

    let env = Environment::new()
        .with("x", 1.0)
        .with("offset", 100.0)
        .with("inner", Binding::scoped("k + x + offset", locals.clone()))
        .with("from_host", Binding::Scoped {
            body: Body::Callable(Rc::new(|values: &Variables| -> Result<f64, EvalError> {
                Ok(values["k"] - values["x"])
            })),
            locals,
        });

    assert_eq!(env.resolve("inner")?, 10.0 + 5.0 + 100.0);
    assert_eq!(env.resolve("from_host")?, 5.0);
    assert_eq!(env.resolve("x")?, 1.0);

    Ok(())
}

#[test]
fn test_circular_reference() {
    let env = Environment::new()
        .with("a", "b + 1")
        .with("b", "a + 1");

    assert_eq!(env.resolve("a"), Err(EvalError::CircularReference { name: "a".into() }));

    let env = Environment::new().with("x", "x");
    assert_eq!(env.resolve("x"), Err(EvalError::CircularReference { name: "x".into() }));
}

#[test]
fn test_errors() {
    let env = Environment::new().with("a", "b * 2");
    assert_eq!(env.resolve("a"), Err(EvalError::UndefinedVariable { name: "b".into() }));

    let env = Environment::new().with("broken", "2 +* 3");
    assert!(matches!(env.resolve("broken"), Err(EvalError::Parse { name, .. }) if name == "broken"));
}

#[test]
fn test_resolve_all() -> Result<(), EvalError> {
    let variables = Variables::from([("w".to_string(), 4.0)]);
    let env = Environment::from(&variables).with("h", "w / 2");

    let resolved = env.resolve_all()?;

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved["h"], 2.0);

    Ok(())
}
