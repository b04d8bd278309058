use super::error::{LexicalError, LexicalErrorType};
use super::token::{Constant, Function, Operator, Token};
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Classifies an identifier run: builtin function, then constant, then variable.
pub fn str_to_token(word: &str) -> Token {
	if let Some(function) = Function::from_name(word) {
		Token::Function(function)
	} else if let Some(constant) = Constant::from_name(word) {
		Token::Constant(constant)
	} else {
		Token::Variable(word.to_string())
	}
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> Option<LexResult> {
		loop {
			let ch = self.ch?;

			let spanned = match ch {
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				',' => self.eat_one_char(Token::Comma),
				'+' => self.eat_one_char(Token::Operator(Operator::Plus)),
				'-' => self.eat_one_char(Token::Operator(Operator::Minus)),
				'*' => self.eat_one_char(Token::Operator(Operator::Star)),
				'/' => self.eat_one_char(Token::Operator(Operator::Slash)),
				'^' => self.eat_one_char(Token::Operator(Operator::Caret)),
				'=' => self.eat_one_char(Token::Operator(Operator::Equals)),
				'a'..='z' | 'A'..='Z' | '_' => self.lex_ident(),
				'0'..='9' | '.' => return Some(self.lex_number()),
				c if c.is_whitespace() => {
					let _ = self.next_char();
					continue;
				},
				c => {
					let location = self.position;
					// skip it so the iterator does not stall on the same character
					let _ = self.next_char();

					return Some(Err(LexicalError {
						error: LexicalErrorType::UnexpectedCharacter { ch: c, position: location },
						location: SrcSpan::from(location, location + c.len_utf8() as u32),
					}));
				}
			};

			return Some(Ok(spanned));
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += 1;

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, str_to_token(&ident), end_pos)
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;

		let mut value = String::new();

		let mut has_period = false;
		let mut has_digit = false;
		let mut has_exponent = false;

		while let Some(ch) = self.ch {
			match ch {
				'0'..='9' => {
					has_digit = true;
					value.push(ch);
					self.next_char();
				},
				'.' if !has_period && !has_exponent => {
					has_period = true;
					value.push(ch);
					self.next_char();
				},
				// `2e` stays a number followed by the constant `e`
				'e' | 'E' if has_digit && !has_exponent && self.exponent_follows() => {
					has_exponent = true;
					value.push(ch);
					self.next_char();

					if let Some(sign @ ('+' | '-')) = self.ch {
						value.push(sign);
						self.next_char();
					}
				},
				_ => break
			}
		}

		let end_pos = self.position;

		match value.parse::<f64>() {
			Ok(number) => Ok((start_pos, Token::Number(number), end_pos)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::InvalidNumber { text: value },
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}

	fn exponent_follows(&self) -> bool {
		matches!(self.next_ch, Some('0'..='9' | '+' | '-'))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_token()
	}
}

pub fn lex(src: &str) -> Lexer<impl Iterator<Item = (u32, char)> + '_> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
}

/// Splits `src` into spanned tokens, stopping at the first lexical error.
pub fn tokenize_spanned(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	lex(src).collect()
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, LexicalError> {
	lex(src)
		.map(|res| res.map(|(_, token, _)| token))
		.collect()
}
