use std::{borrow::Cow, iter::Peekable, str::CharIndices};

use crate::{lexer::prelude::Function, utils::prelude::SrcSpan};

const GREEK: [&str; 30] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta", "vartheta",
    "iota", "kappa", "lambda", "mu", "nu", "xi", "rho", "sigma", "tau", "upsilon",
    "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Sigma", "Omega",
];

/// A backslash macro with no plain-grammar meaning, kept as a bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMacro {
    pub name: String,
    pub span: SrcSpan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub unknown: Vec<UnknownMacro>,
}

pub fn has_markup(text: &str) -> bool {
    text.contains(['\\', '{', '}', '[', ']'])
}

/// Rewrites markup into plain grammar, reporting macros it had to guess at.
pub fn normalize_reporting(text: &str) -> Normalized {
    let mut rewriter = Rewriter {
        chars: text.char_indices().peekable(),
        unknown: vec![],
    };

    let text = rewriter.rewrite_until(None);

    Normalized {
        text,
        unknown: rewriter.unknown,
    }
}

pub fn normalize(text: &str) -> String {
    normalize_reporting(text).text
}

/// `text` untouched unless it carries markup.
pub fn prepare(text: &str) -> Cow<'_, str> {
    if has_markup(text) {
        Cow::Owned(normalize(text))
    } else {
        Cow::Borrowed(text)
    }
}

struct Rewriter<'a> {
    chars: Peekable<CharIndices<'a>>,
    unknown: Vec<UnknownMacro>,
}

impl<'a> Rewriter<'a> {
    /// Rewrites up to and including `close`, or to the end of input.
    fn rewrite_until(&mut self, close: Option<char>) -> String {
        let mut out = String::new();

        while let Some((position, ch)) = self.chars.next() {
            match ch {
                _ if Some(ch) == close => return out,
                '{' => out.push_str(&format!("({})", self.rewrite_until(Some('}')))),
                '[' => out.push_str(&format!("({})", self.rewrite_until(Some(']')))),
                '}' | ']' => out.push(')'),
                '\\' => out.push_str(&self.command(position)),
                ch => out.push(ch)
            }
        }

        out
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, ch)| ch.is_whitespace()).is_some() {}
    }

    /// A braced group, or the single character after a macro as in `\frac12`.
    fn argument(&mut self) -> String {
        self.skip_whitespace();

        match self.chars.next() {
            Some((_, '{')) => self.rewrite_until(Some('}')),
            Some((_, ch)) => ch.to_string(),
            None => String::new()
        }
    }

    fn word(&mut self) -> String {
        let mut word = String::new();

        while let Some((_, ch)) = self.chars.next_if(|(_, ch)| ch.is_ascii_alphabetic()) {
            word.push(ch);
        }

        word
    }

    fn delimiter(&mut self, opening: bool) -> String {
        self.skip_whitespace();

        let paren = if opening { "(" } else { ")" };

        match self.chars.next() {
            Some((_, '(' | ')' | '[' | ']')) => paren.to_string(),
            Some((_, '\\')) => {
                // `\left\{`
                let _ = self.chars.next();
                paren.to_string()
            },
            Some((_, '.')) | None => String::new(),
            Some((_, ch)) => ch.to_string()
        }
    }

    fn command(&mut self, position: usize) -> String {
        let word = self.word();

        match word.as_str() {
            // `\,` `\;` `\{` and friends
            "" => match self.chars.next() {
                Some((_, '{')) => "(".to_string(),
                Some((_, '}')) => ")".to_string(),
                _ => " ".to_string()
            },
            "frac" | "dfrac" | "tfrac" => {
                let numerator = self.argument();
                let denominator = self.argument();

                format!("(({numerator})/({denominator}))")
            },
            "sqrt" => {
                self.skip_whitespace();

                match self.chars.next_if(|(_, ch)| *ch == '[') {
                    Some(_) => {
                        let degree = self.rewrite_until(Some(']'));
                        let radicand = self.argument();

                        format!("(({radicand})^(1/({degree})))")
                    },
                    None => format!("sqrt({})", self.argument())
                }
            },
            "left" => self.delimiter(true),
            "right" => self.delimiter(false),
            "cdot" | "times" => "*".to_string(),
            "div" => "/".to_string(),
            "infty" => " inf ".to_string(),
            "pi" => " pi ".to_string(),
            name if GREEK.contains(&name) || Function::from_name(name).is_some() => {
                format!(" {name} ")
            },
            name => {
                self.unknown.push(UnknownMacro {
                    name: name.to_string(),
                    span: SrcSpan::from(position as u32, (position + 1 + name.len()) as u32),
                });

                format!(" {name} ")
            }
        }
    }
}
