use std::io::Write;

use calc_core::{
	lexer::prelude::lex,
	parser::prelude::ParseError,
	utils::prelude::Error
};

use crate::cli::print_error;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		let input = input.trim_end_matches(['\n', '\r']);

		match input {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for res in lex(input) {
					match res {
						Ok((start, token, end)) => println!("{start}..{end}\t{token:?}"),
						Err(err) => {
							print_error(&Error::Parse {
								name: "<input>".into(),
								src: input.to_string(),
								error: ParseError::from(err),
							});
							break;
						}
					}
				}
			}
		}
	}
}
