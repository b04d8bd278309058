use std::io::Write;

use calc_core::{
	environment::prelude::{Binding, Environment, Variables},
	lexer::prelude::{tokenize, Token},
	solver::prelude::{solve_equation, SolveOptions},
	utils::prelude::{Error, SourceWarningEmitter, WarningEmitter}
};

use crate::{cli::print_error, parse_source};

const PROMPT: &str = ">> ";

/// Read Eval Print Loop.
///
/// `name = expr` stores a lazy binding, any other line with `=` is solved
/// against the bindings that currently resolve, everything else is evaluated.
pub fn start(warnings: WarningEmitter) -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}).map_err(std::io::Error::other)?;

	let stdin = std::io::stdin();
	let mut env = Environment::new();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input.trim() {
			"" => {},
			".exit" => return Ok(()),
			line => {
				if let Err(error) = step(&mut env, line, &warnings) {
					print_error(&error);
				}
			}
		}
	}
}

fn step(env: &mut Environment, line: &str, warnings: &WarningEmitter) -> Result<(), Error> {
	let Some((left, right)) = line.split_once('=') else {
		let expr = parse_source("<input>", line, warnings)?;
		println!("{}", env.evaluate(&expr)?);

		return Ok(());
	};

	match binding_name(left) {
		Some(name) if !right.contains('=') => {
			// reject bodies that would never parse before storing them
			parse_source("<input>", right.trim(), warnings)?;
			env.set(name.clone(), Binding::expression(right.trim()));

			match env.resolve(&name) {
				Ok(value) => println!("{name} = {value}"),
				Err(_) => println!("{name} = {}", right.trim())
			}
		},
		_ => {
			let solution = solve_equation(line, &resolvable(env), &SolveOptions::default())
				.map_err(|error| Error::Solve {
					name: "<input>".into(),
					src: line.to_string(),
					error,
				})?;

			if let Some(warning) = solution.warning() {
				SourceWarningEmitter::new("<input>", line, warnings.clone()).solver(warning);
			}

			println!("{solution}");
		}
	}

	Ok(())
}

/// `left` when it is a lone variable.
fn binding_name(left: &str) -> Option<String> {
	match tokenize(left).ok()?.as_slice() {
		[Token::Variable(name)] => Some(name.clone()),
		_ => None
	}
}

fn resolvable(env: &Environment) -> Variables {
	env.store.keys()
		.filter_map(|name| env.resolve(name).ok().map(|value| (name.clone(), value)))
		.collect()
}
