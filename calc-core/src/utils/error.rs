use termcolor::Buffer;
use thiserror::Error;

use crate::{
    analyzer::prelude::ValidationError,
    compiler::prelude::CodegenError,
    eval::prelude::EvalError,
    parser::prelude::{ParseError, ParseErrorType},
    solver::prelude::SolveError,
    utils::prelude::SrcSpan
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

/// Every failure a front end can report, with the source text it came from.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse `{name}`")]
    Parse {
        name: String,
        src: String,
        error: ParseError
    },
    #[error("failed to solve `{name}`")]
    Solve {
        name: String,
        src: String,
        error: SolveError
    },
    #[error("evaluation failed")]
    Eval {
        error: EvalError
    },
    #[error("invalid expression")]
    Validation {
        error: ValidationError
    },
    #[error("code generation failed")]
    Codegen {
        error: CodegenError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl From<EvalError> for Error {
    fn from(error: EvalError) -> Self {
        Error::Eval { error }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation { error }
    }
}

impl From<CodegenError> for Error {
    fn from(error: CodegenError) -> Self {
        Error::Codegen { error }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { err: err.kind() }
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { name, src, error } => vec![syntax_error(name, src, error, 0)],
            Error::Solve { name, src, error } => match error {
                SolveError::Parse { offset, error } => vec![syntax_error(name, src, error, *offset)],
                SolveError::NotAnEquation { .. } | SolveError::EmptySide { .. } => {
                    vec![Diagnostic {
                        title: "Malformed equation".into(),
                        text: format!("{error}"),
                        level: Level::Error,
                        location: Some(Location {
                            src,
                            name: name.clone(),
                            label: Label {
                                text: Some("Expected `<expression> = <expression>`".into()),
                                span: SrcSpan::from(0, src.len() as u32),
                            },
                            extra_labels: vec![]
                        }),
                    }]
                },
                _ => vec![Diagnostic {
                    title: "Cannot solve".into(),
                    text: format!("{error}"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        name: name.clone(),
                        label: Label {
                            text: None,
                            span: SrcSpan::from(0, src.len() as u32),
                        },
                        extra_labels: vec![]
                    }),
                }]
            },
            Error::Eval { error } => vec![Diagnostic {
                title: "Evaluation error".into(),
                text: format!("{error}"),
                level: Level::Error,
                location: None,
            }],
            Error::Validation { error } => vec![Diagnostic {
                title: "Invalid expression".into(),
                text: format!("{error}"),
                level: Level::Error,
                location: None,
            }],
            Error::Codegen { error } => vec![Diagnostic {
                title: "Code generation error".into(),
                text: format!("{error}"),
                level: Level::Error,
                location: None,
            }],
            Error::StdIo { err } => vec![Diagnostic {
                title: "Standard IO error".into(),
                text: format!("{err}"),
                level: Level::Error,
                location: None,
            }]
        }
    }
}

/// `offset` shifts spans of an equation side back into the full equation text.
fn syntax_error<'a>(name: &str, src: &'a str, error: &ParseError, offset: u32) -> Diagnostic<'a> {
    let (label, extra) = error.details();
    let text = extra.join("\n");

    let span = if matches!(error.error, ParseErrorType::UnexpectedEof | ParseErrorType::EmptyExpression) {
        SrcSpan::from(src.len() as u32, src.len() as u32)
    } else {
        error.span.shifted(offset)
    };

    Diagnostic {
        title: "Syntax error".into(),
        text,
        level: Level::Error,
        location: Some(Location {
            src,
            name: name.to_string(),
            label: Label {
                text: Some(label.to_string()),
                span,
            },
            extra_labels: vec![],
        }),
    }
}
