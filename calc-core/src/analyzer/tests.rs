use crate::{
    lexer::prelude::{Arity, Function},
    parser::prelude::{parse_str, BinaryOp, Expr, ParseError}
};

use super::prelude::{is_valid_identifier, validate, ValidationError, Validator};

#[test]
fn test_parsed_expressions_are_valid() -> Result<(), ParseError> {
    let inputs = [
        "2 + 3 * 4",
        "sin(x)^2 + cos(x)^2",
        "log(8, 2) + log(e)",
        "clamp(t, 0, 1) * lerp(a, b, t)",
        "max(1, 2, 3, 4, 5)",
    ];

    for input in inputs {
        let expr = parse_str(input)?;
        assert_eq!(validate(&expr), Ok(()), "{input}");
    }

    Ok(())
}

#[test]
fn test_arity() -> Result<(), ParseError> {
    let expr = parse_str("atan2(1)")?;

    assert_eq!(validate(&expr), Err(ValidationError::ArityMismatch {
        function: Function::Atan2,
        expected: Arity::Exact(2),
        got: 1,
    }));

    assert!(validate(&parse_str("log(1, 2, 3)")?).is_err());
    assert!(validate(&parse_str("max()")?).is_err());
    assert!(validate(&parse_str("sin(1, 2)")?).is_err());

    Ok(())
}

#[test]
fn test_every_problem_is_reported() {
    let expr = Expr::binary(
        BinaryOp::Add,
        Expr::variable("2x"),
        Expr::call(Function::Clamp, vec![Expr::variable("a b")])
    );

    let problems = Validator::analyze(&expr);

    assert_eq!(problems.len(), 3);
    assert_eq!(problems[0], ValidationError::InvalidVariableName { name: "2x".into() });
}

#[test]
fn test_named_constructors() {
    assert!(Expr::call_named("sqrt", vec![Expr::number(4.0)]).is_ok());
    assert_eq!(
        Expr::call_named("system", vec![]),
        Err(ValidationError::UnknownFunction { name: "system".into() })
    );
    assert_eq!(
        Expr::constant_named("tau"),
        Err(ValidationError::UnknownConstant { name: "tau".into() })
    );
    assert_eq!(
        Expr::binary_named("%", Expr::number(1.0), Expr::number(2.0)),
        Err(ValidationError::UnknownOperator { symbol: "%".into() })
    );
    assert_eq!(
        Expr::binary_named("=", Expr::number(1.0), Expr::number(2.0)),
        Err(ValidationError::UnknownOperator { symbol: "=".into() })
    );
}

#[test]
fn test_identifiers() {
    assert!(is_valid_identifier("x"));
    assert!(is_valid_identifier("_tmp1"));
    assert!(is_valid_identifier("Velocity_2"));
    assert!(!is_valid_identifier(""));
    assert!(!is_valid_identifier("1x"));
    assert!(!is_valid_identifier("x-y"));
    assert!(!is_valid_identifier("é"));
}
