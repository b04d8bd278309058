use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnexpectedCharacter { ch: char, position: u32 },
    InvalidNumber { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            LexicalErrorType::UnexpectedCharacter { ch, .. } => {
                ("Unexpected character", vec![format!("`{ch}` is not part of the expression grammar")])
            },
            LexicalErrorType::InvalidNumber { text } => {
                ("Invalid number", vec![format!("`{text}` is not a valid number")])
            }
        }
    }

    fn message(&self) -> String {
        match &self.error {
            LexicalErrorType::UnexpectedCharacter { ch, position } => {
                format!("unexpected character `{ch}` at position {position}")
            },
            LexicalErrorType::InvalidNumber { text } => format!("invalid number `{text}`")
        }
    }
}
