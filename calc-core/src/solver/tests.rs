use crate::{
    environment::prelude::Variables,
    parser::prelude::parse_str
};

use super::prelude::{
    extract_2var_coefficients, extract_linear_coefficients, find_unknowns, is_linear_in, newton_raphson,
    parse_equation, solve, solve_equation, solve_system, SolveError, SolveOptions, SolveWarning, Solution
};

fn no_bindings() -> Variables {
    Variables::new()
}

fn assert_near(solution: &Solution, name: &str, expected: f64, tolerance: f64) {
    match solution.value(name) {
        Some(value) => assert!((value - expected).abs() < tolerance, "{name} = {value}, expected {expected}"),
        None => panic!("no value for {name} in {solution:?}")
    }
}

#[test]
fn test_parse_equation() -> Result<(), SolveError> {
    let equation = parse_equation("2*x + 3 = 11")?;

    assert_eq!(equation.left, parse_str("2*x + 3").map_err(|error| SolveError::Parse { offset: 0, error })?);
    assert_eq!(equation.to_string(), "2 * x + 3 = 11");

    assert!(matches!(parse_equation("2*x"), Err(SolveError::NotAnEquation { .. })));
    assert!(matches!(parse_equation(" = 3"), Err(SolveError::EmptySide { .. })));
    assert!(matches!(parse_equation("x =  "), Err(SolveError::EmptySide { .. })));

    // only the first `=` splits, the rest is a parse error on the right side
    match parse_equation("x = 1 = 2") {
        Err(SolveError::Parse { offset, .. }) => assert_eq!(offset, 3),
        other => panic!("{other:?}")
    }

    Ok(())
}

#[test]
fn test_find_unknowns() -> Result<(), SolveError> {
    let equation = parse_equation("a*x + b = y")?;
    let bindings = Variables::from([("a".to_string(), 1.0), ("b".to_string(), 2.0)]);

    let unknowns = find_unknowns(&equation.left, &bindings);
    assert_eq!(unknowns.into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);

    let unknowns = equation.unknowns(&bindings);
    assert_eq!(unknowns.into_iter().collect::<Vec<_>>(), vec!["x".to_string(), "y".to_string()]);

    Ok(())
}

#[test]
fn test_linearity() -> Result<(), SolveError> {
    let cases = [
        ("3*x + 2", true),
        ("x / 4 - 1", true),
        ("-(x - 2) * 5", true),
        ("sin(2) * x", true),
        ("x * x", false),
        ("x ^ 2", false),
        ("2 ^ x", false),
        ("sqrt(x)", false),
        ("y * y + x", true),
        ("1 / x", true),
    ];

    for (src, expected) in cases {
        let expr = parse_str(src).map_err(|error| SolveError::Parse { offset: 0, error })?;
        assert_eq!(is_linear_in(&expr, "x"), expected, "{src}");
    }

    Ok(())
}

#[test]
fn test_coefficients() -> Result<(), SolveError> {
    let bindings = Variables::from([("k".to_string(), 3.0)]);

    let expr = parse_str("k * (2*x - 1) / 2 + 4").map_err(|error| SolveError::Parse { offset: 0, error })?;
    assert_eq!(extract_linear_coefficients(&expr, "x", &bindings)?, (3.0, 2.5));

    let expr = parse_str("1 / x").map_err(|error| SolveError::Parse { offset: 0, error })?;
    assert!(matches!(
        extract_linear_coefficients(&expr, "x", &bindings),
        Err(SolveError::NonLinearTerm { .. })
    ));

    let expr = parse_str("2*x - k*y + 1").map_err(|error| SolveError::Parse { offset: 0, error })?;
    assert_eq!(extract_2var_coefficients(&expr, "x", "y", &bindings)?, (2.0, -3.0, 1.0));

    let expr = parse_str("x * y").map_err(|error| SolveError::Parse { offset: 0, error })?;
    assert!(matches!(
        extract_2var_coefficients(&expr, "x", "y", &bindings),
        Err(SolveError::NonLinearTerm { .. })
    ));

    Ok(())
}

#[test]
fn test_linear_equation() -> Result<(), SolveError> {
    let solution = solve_equation("2*x+3=11", &no_bindings(), &SolveOptions::default())?;

    assert_eq!(solution, Solution::solved("x", 4.0));

    let solution = solve_equation("x / 4 = 2 - x", &no_bindings(), &SolveOptions::default())?;
    assert_near(&solution, "x", 1.6, 1e-12);

    Ok(())
}

#[test]
fn test_degenerate_equations() -> Result<(), SolveError> {
    let solution = solve_equation("x=x", &no_bindings(), &SolveOptions::default())?;
    assert_eq!(solution, Solution::InfiniteSolutions);
    assert_eq!(solution.error(), Some("infinite solutions"));

    let solution = solve_equation("x+1=x", &no_bindings(), &SolveOptions::default())?;
    assert_eq!(solution, Solution::NoSolution);
    assert_eq!(solution.error(), Some("no solution"));

    let solution = solve_equation("0*x = 1e-11", &no_bindings(), &SolveOptions::default())?;
    assert_eq!(solution, Solution::NoSolution);

    Ok(())
}

#[test]
fn test_newton_fallback() -> Result<(), SolveError> {
    let options = SolveOptions::default().initial_guess(3.0);
    let solution = solve_equation("x^2=4", &no_bindings(), &options)?;
    assert_near(&solution, "x", 2.0, 1e-8);
    assert_eq!(solution.warning(), None);

    let options = SolveOptions::default().initial_guess(-3.0);
    let solution = solve_equation("x^2=4", &no_bindings(), &options)?;
    assert_near(&solution, "x", -2.0, 1e-8);

    Ok(())
}

#[test]
fn test_non_linear_term_is_an_error() {
    let result = solve_equation("1/x = 4", &no_bindings(), &SolveOptions::default());
    assert!(matches!(result, Err(SolveError::NonLinearTerm { .. })));

    let result = solve_equation("2 = 3/(x+1)", &no_bindings(), &SolveOptions::default());
    assert!(matches!(result, Err(SolveError::NonLinearTerm { .. })));
}

#[test]
fn test_newton_without_codegen() -> Result<(), SolveError> {
    let options = SolveOptions {
        codegen: false,
        initial_guess: 1.0,
        ..Default::default()
    };

    let solution = solve_equation("exp(x) = 2", &no_bindings(), &options)?;
    assert_near(&solution, "x", std::f64::consts::LN_2, 1e-8);

    Ok(())
}

#[test]
fn test_non_convergence_is_a_warning() -> Result<(), SolveError> {
    let options = SolveOptions {
        max_iterations: 5,
        ..Default::default()
    };

    let solution = solve_equation("x^2 = -1", &no_bindings(), &options)?;

    assert_eq!(solution.warning(), Some(SolveWarning::MayNotHaveConverged));
    assert!(solution.value("x").is_some());
    assert!(solution.to_string().ends_with("(may not have converged)"));

    Ok(())
}

#[test]
fn test_flat_derivative_is_nudged() -> Result<(), SolveError> {
    // f'(0) = 0, so the first step moves to 1
    let root = newton_raphson(|x| Ok(x * x - 9.0), 0.0, 1e-10, 100)?;

    assert!(root.converged);
    assert!((root.value - 3.0).abs() < 1e-8);

    Ok(())
}

#[test]
fn test_check_without_unknowns() -> Result<(), SolveError> {
    let bindings = Variables::from([("x".to_string(), 2.0)]);

    let solution = solve_equation("x^2 = 4", &bindings, &SolveOptions::default())?;
    assert_eq!(solution, Solution::Check { satisfied: true, left: 4.0, right: 4.0 });

    let solution = solve_equation("x = 3", &bindings, &SolveOptions::default())?;
    assert!(matches!(solution, Solution::Check { satisfied: false, .. }));

    Ok(())
}

#[test]
fn test_unknown_selection() -> Result<(), SolveError> {
    assert!(matches!(
        solve_equation("x + y = 3", &no_bindings(), &SolveOptions::default()),
        Err(SolveError::AmbiguousUnknowns { unknowns }) if unknowns == ["x", "y"]
    ));

    assert!(matches!(
        solve_equation("x + 1 = 3", &no_bindings(), &SolveOptions::default().solve_for("z")),
        Err(SolveError::UnknownSolveTarget { name }) if name == "z"
    ));

    // the target wins over its own binding
    let bindings = Variables::from([("x".to_string(), 10.0), ("y".to_string(), 1.0)]);
    let solution = solve_equation("x + y = 3", &bindings, &SolveOptions::default().solve_for("x"))?;
    assert_eq!(solution, Solution::solved("x", 2.0));

    Ok(())
}

#[test]
fn test_option_variables_layer_on_top() -> Result<(), SolveError> {
    let bindings = Variables::from([("a".to_string(), 1.0)]);
    let options = SolveOptions {
        variables: Variables::from([("a".to_string(), 2.0)]),
        ..Default::default()
    };

    let solution = solve_equation("a * x = 8", &bindings, &options)?;
    assert_eq!(solution, Solution::solved("x", 4.0));

    Ok(())
}

#[test]
fn test_two_by_two() -> Result<(), SolveError> {
    let solution = solve_system(&["x+y=10", "x-y=2"], &no_bindings(), &SolveOptions::default())?;

    assert_near(&solution, "x", 6.0, 1e-12);
    assert_near(&solution, "y", 4.0, 1e-12);

    let solution = solve_system(&["x+y=1", "2*x+2*y=5"], &no_bindings(), &SolveOptions::default())?;
    assert_eq!(solution, Solution::Singular);
    assert_eq!(solution.error(), Some("no unique solution (singular matrix)"));

    Ok(())
}

#[test]
fn test_substitution() -> Result<(), SolveError> {
    let equations = ["y = x^2", "x = 3", "z = y - x"];
    let solution = solve_system(&equations, &no_bindings(), &SolveOptions::default())?;

    assert_near(&solution, "x", 3.0, 1e-12);
    assert_near(&solution, "y", 9.0, 1e-12);
    assert_near(&solution, "z", 6.0, 1e-12);

    // two equations, two unknowns, but not linear
    let solution = solve_system(&["x * y = 6", "x = 2"], &no_bindings(), &SolveOptions::default())?;
    assert_near(&solution, "y", 3.0, 1e-8);

    Ok(())
}

#[test]
fn test_unsolvable_system() -> Result<(), SolveError> {
    let solution = solve_system(&["x * y = 6", "x + y + z = 1"], &no_bindings(), &SolveOptions::default())?;

    assert_eq!(solution, Solution::Unsolvable);
    assert_eq!(solution.error(), Some("system could not be solved with available methods"));

    Ok(())
}

#[test]
fn test_solve_dispatch() -> Result<(), SolveError> {
    let options = SolveOptions::default();

    assert_eq!(solve(&["2+3*4"], &no_bindings(), &options)?, Solution::Evaluated(14.0));
    assert_eq!(solve(&["2*x+3=11"], &no_bindings(), &options)?, Solution::solved("x", 4.0));
    assert!(matches!(solve(&["x+y=10", "x-y=2"], &no_bindings(), &options)?, Solution::Solved { .. }));
    assert!(matches!(solve::<&str>(&[], &no_bindings(), &options), Err(SolveError::EmptySystem)));

    Ok(())
}
