use crate::{
    compiler::prelude::{CodegenError, Evaluate, Strategy},
    environment::prelude::Variables,
    eval::prelude::{evaluate, EvalError},
    parser::prelude::parse_str
};

use super::prelude::{emit_ir, Jit};

#[test]
fn test_emit_ir() -> Result<(), CodegenError> {
    let expr = parse_str("-x * sin(y) ^ 2").map_err(|err| CodegenError::Builder(err.to_string()))?;
    let ir = emit_ir(&expr)?;

    assert!(ir.contains("define double @expr(ptr"), "{ir}");
    assert!(ir.contains("fneg"), "{ir}");
    assert!(ir.contains("@calc_call"), "{ir}");
    assert!(ir.contains("@calc_pow"), "{ir}");

    Ok(())
}

#[test]
fn test_jit_matches_interpreter() -> Result<(), CodegenError> {
    let corpus = [
        "2+3*4",
        "2^3^2",
        "-2^2 + 2^-1",
        "x * y - x / y",
        "sqrt(x^2 + y^2)",
        "sinh(x) + cosh(y) - tanh(x * y)",
        "log(x, 2) + log10(y) + ln(x)",
        "min(x, y, 0.5) + max(x, -y)",
        "clamp(x * 10, 0, 1) + lerp(x, y, 0.3)",
        "round(x * 7.5) + trunc(-y) + sign(x - y)",
        "atan2(y, x) + deg(pi) + rad(90)",
        "0 / 0",
        "1 / (x - x)",
    ];

    let variables = Variables::from([("x".to_string(), 1.25), ("y".to_string(), -0.5)]);

    for src in corpus {
        let expr = parse_str(src).map_err(|err| CodegenError::Builder(err.to_string()))?;
        let jit = Jit::compile(&expr)?;

        assert_eq!(jit.strategy(), Strategy::Jit);

        let interpreted = evaluate(&expr, &variables);
        let compiled = jit.evaluate(&variables);

        match (interpreted, compiled) {
            (Ok(a), Ok(b)) if a.is_nan() => assert!(b.is_nan(), "{src}: {a} != {b}"),
            (Ok(a), Ok(b)) => assert_eq!(a.to_bits(), b.to_bits(), "{src}: {a} != {b}"),
            (a, b) => panic!("{src}: {a:?} != {b:?}")
        }
    }

    Ok(())
}

#[test]
fn test_jit_reports_missing_variables() -> Result<(), CodegenError> {
    let expr = parse_str("a + b * c").map_err(|err| CodegenError::Builder(err.to_string()))?;
    let jit = Jit::compile(&expr)?;

    assert_eq!(jit.slots(), ["a", "b", "c"]);

    let variables = Variables::from([("a".to_string(), 1.0)]);

    assert_eq!(jit.evaluate(&variables), Err(EvalError::UndefinedVariable { name: "b".into() }));
    assert_eq!(jit.evaluate(&variables), evaluate(&expr, &variables));

    Ok(())
}
