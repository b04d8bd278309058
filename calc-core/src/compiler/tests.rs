use crate::{
    analyzer::prelude::ValidationError,
    environment::prelude::Variables,
    eval::prelude::{evaluate, EvalError},
    lexer::prelude::Function,
    parser::prelude::{parse_str, Expr}
};

use super::prelude::{compile, compile_with, CompileOptions, Evaluate, Interpreted, Strategy};

const CORPUS: [&str; 10] = [
    "2+3*4",
    "2^3^2",
    "-x^2 + 3*x - 1",
    "sin(x)^2 + cos(x)^2",
    "exp(ln(y)) - y",
    "max(x, y, 2) / min(x, y, 2)",
    "clamp(x, 0, 1) * lerp(1, 5, y)",
    "asinh(x) + acosh(y + 2) + atanh(x / 10)",
    "round(x * 3.5) - floor(y) + ceil(-x)",
    "cbrt(y^3) + log2(16) + abs(-x)",
];

fn sample_bindings() -> Vec<Variables> {
    [(0.5, 2.0), (-1.5, 0.25), (3.0, 7.0)].into_iter()
        .map(|(x, y)| Variables::from([("x".to_string(), x), ("y".to_string(), y)]))
        .collect()
}

#[test]
fn test_compiled_matches_evaluate() -> Result<(), Box<dyn std::error::Error>> {
    for src in CORPUS {
        let expr = parse_str(src)?;
        let compiled = compile(&expr)?;

        for variables in sample_bindings() {
            let expected = evaluate(&expr, &variables)?;
            let got = compiled.evaluate(&variables)?;

            assert_eq!(expected.to_bits(), got.to_bits(), "{src} with {variables:?}");
        }
    }

    Ok(())
}

#[test]
fn test_codegen_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let expr = parse_str("x * 2")?;
    let compiled = compile_with(&expr, CompileOptions { codegen: false })?;

    assert_eq!(compiled.strategy(), Strategy::Interpreted);
    assert_eq!(compiled.evaluate(&Variables::from([("x".to_string(), 4.0)]))?, 8.0);
    assert_eq!(compiled.expr(), &expr);

    Ok(())
}

#[test]
fn test_default_strategy() -> Result<(), Box<dyn std::error::Error>> {
    let compiled = compile(&parse_str("1 + 1")?)?;

    let expected = if cfg!(feature = "compiler") {
        Strategy::Jit
    } else {
        Strategy::Interpreted
    };

    assert_eq!(compiled.strategy(), expected);

    Ok(())
}

#[test]
fn test_errors_match_evaluate() -> Result<(), Box<dyn std::error::Error>> {
    let expr = parse_str("x + y")?;
    let compiled = compile(&expr)?;
    let variables = Variables::from([("x".to_string(), 1.0)]);

    assert_eq!(compiled.evaluate(&variables), Err(EvalError::UndefinedVariable { name: "y".into() }));
    assert_eq!(compiled.evaluate(&variables), evaluate(&expr, &variables));

    Ok(())
}

#[test]
fn test_invalid_trees_are_rejected() {
    let expr = Expr::call(Function::Pow, vec![Expr::number(2.0)]);
    assert!(matches!(compile(&expr), Err(ValidationError::ArityMismatch { .. })));

    let expr = Expr::variable("not a name");
    assert!(matches!(compile(&expr), Err(ValidationError::InvalidVariableName { .. })));
}

#[test]
fn test_interpreted_strategy() -> Result<(), Box<dyn std::error::Error>> {
    let interpreted = Interpreted::new(parse_str("pi * 2")?);

    assert_eq!(interpreted.strategy(), Strategy::Interpreted);
    assert_eq!(interpreted.evaluate(&Variables::new())?, std::f64::consts::PI * 2.0);

    Ok(())
}
