use std::collections::{BTreeMap, BTreeSet};

use crate::environment::prelude::Variables;

use super::{
    equation::{parse_equation, solve_equation, solve_for_variable, Equation},
    error::SolveError,
    linear::solve_linear_2x2,
    solution::{SolveOptions, Solution}
};

/// Solves several equations together.
///
/// Two linear equations in two unknowns go through Cramer's rule. Anything else
/// is solved by substitution: each pass solves every equation that has exactly one
/// unknown left and feeds the result to the next ones.
pub fn solve_system<S: AsRef<str>>(
    texts: &[S],
    variables: &Variables,
    options: &SolveOptions
) -> Result<Solution, SolveError> {
    match texts {
        [] => return Err(SolveError::EmptySystem),
        [text] => return solve_equation(text.as_ref(), variables, options),
        _ => {}
    }

    let equations = texts.iter()
        .map(|text| parse_equation(text.as_ref()))
        .collect::<Result<Vec<Equation>, SolveError>>()?;

    let bindings = options.bindings(variables);

    let unknowns = equations.iter()
        .flat_map(|equation| equation.unknowns(&bindings))
        .collect::<BTreeSet<String>>();

    if let ([first, second], [x, y]) = (equations.as_slice(), unknowns.iter().collect::<Vec<_>>().as_slice()) {
        match solve_linear_2x2([first, second], x, y, &bindings) {
            Err(SolveError::NonLinearTerm { .. }) => {},
            result => return result
        }
    }

    solve_by_substitution(&equations, &unknowns, bindings, options)
}

fn solve_by_substitution(
    equations: &[Equation],
    unknowns: &BTreeSet<String>,
    mut known: Variables,
    options: &SolveOptions
) -> Result<Solution, SolveError> {
    let mut values = BTreeMap::new();
    let mut warning = None;

    let single = SolveOptions {
        solve_for: None,
        ..options.clone()
    };

    for _ in 0..options.max_iterations {
        let mut progress = false;

        for equation in equations {
            let mut pending = equation.unknowns(&known).into_iter();

            // no unknowns left means satisfied or not, nothing more to learn from it
            let variable = match (pending.next(), pending.next()) {
                (Some(variable), None) => variable,
                _ => continue
            };

            if let Ok(Solution::Solved { values: solved, warning: solved_warning }) =
                solve_for_variable(equation, &variable, &known, &single)
            {
                for (name, value) in solved {
                    known.insert(name.clone(), value);
                    values.insert(name, value);
                }

                warning = warning.or(solved_warning);
                progress = true;
            }
        }

        if unknowns.iter().all(|name| values.contains_key(name)) {
            return Ok(Solution::Solved { values, warning });
        }

        if !progress {
            break;
        }
    }

    Ok(Solution::Unsolvable)
}
