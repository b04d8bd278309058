use thiserror::Error;

use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    EmptyExpression,
    MissingOperand,
    MisplacedComma,
    UnmatchedOpenParen,
    UnmatchedCloseParen,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", self.message())]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::EmptyExpression => ("Empty expression", vec![]),
            ParseErrorType::MissingOperand => ("Operator is missing an operand", vec![]),
            ParseErrorType::MisplacedComma => ("Comma outside of a function call", vec![]),
            ParseErrorType::UnmatchedOpenParen => ("This `(` is never closed", vec![]),
            ParseErrorType::UnmatchedCloseParen => ("This `)` has no matching `(`", vec![]),
            ParseErrorType::UnexpectedEof => ("Unexpected end of expression", vec![]),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = match token {
                    Token::Number(_) => "a Number".to_string(),
                    Token::Variable(_) => "a Variable".to_string(),
                    Token::Function(function) => format!("the function `{function}`"),
                    _ => format!("`{}`", token.as_literal())
                };

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }

    fn message(&self) -> String {
        match &self.error {
            ParseErrorType::UnexpectedToken { token, .. } => {
                format!("unexpected `{}` at {}", token.as_literal(), self.span)
            },
            ParseErrorType::LexError { error } => error.to_string(),
            _ => format!("{} at {}", self.details().0.to_lowercase(), self.span)
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        let span = error.location;

        ParseError {
            error: ParseErrorType::LexError { error },
            span
        }
    }
}
