use crate::{
    lexer::prelude::{lex, Function, LexResult, LexicalError, Operator, Spanned, Token},
    markup,
    utils::prelude::SrcSpan
};
use super::ast::{BinaryOp, Expr, NEG_PRECEDENCE};
use super::error::{ParseError, ParseErrorType};

/// Entries of the operator stack.
#[derive(Debug, Clone, PartialEq)]
enum Pending {
    Binary(BinaryOp, SrcSpan),
    Neg(SrcSpan),
    LParen(SrcSpan),
    // always sits directly below the `(` that opens its argument list
    Function {
        function: Function,
        args: usize,
        span: SrcSpan,
    },
}

impl Pending {
    fn precedence(&self) -> Option<u8> {
        match self {
            Pending::Binary(op, _) => Some(op.precedence()),
            Pending::Neg(_) => Some(NEG_PRECEDENCE),
            Pending::LParen(_) | Pending::Function { .. } => None,
        }
    }
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
    output: Vec<Expr>,
    operators: Vec<Pending>,
    expect_operand: bool,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            lex_errors: vec![],

            tokens: input,
            output: vec![],
            operators: vec![],
            expect_operand: true,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        if self.lex_errors.is_empty() {
            match self.tokens.next() {
                Some(Ok(tok)) => next = Some(tok),
                Some(Err(err)) => self.lex_errors.push(err),
                None => {}
            }
        }

        self.current_token = self.next_token.take();
        self.next_token = next;

        t
    }

    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression();

        // a lexical error ends the token stream early, so it outranks whatever
        // the parser made of the truncated input
        if let Some(error) = self.lex_errors.first() {
            return Err(error.clone().into());
        }

        expr
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut last_end = 0;

        while let Some((start, token, end)) = self.next_token() {
            let span = SrcSpan::from(start, end);
            last_end = end;

            match token {
                Token::Number(value) => self.push_operand(Expr::Number(value), token, span)?,
                Token::Constant(constant) => self.push_operand(Expr::Constant(constant), token, span)?,
                Token::Variable(ref name) => {
                    let operand = Expr::Variable(name.clone());
                    self.push_operand(operand, token, span)?
                },
                Token::Function(function) => {
                    if !self.expect_operand {
                        return unexpected(token, span, &["an operator", "`)`", "`,`"]);
                    }

                    match &self.current_token {
                        Some((_, Token::LParen, _)) => {},
                        Some((start, next, end)) => return unexpected(
                            next.clone(),
                            SrcSpan::from(*start, *end),
                            &["`(`"]
                        ),
                        None => return parse_error(
                            ParseErrorType::UnexpectedEof,
                            SrcSpan::from(end, end)
                        )
                    }

                    self.operators.push(Pending::Function { function, args: 1, span });
                },
                Token::LParen => {
                    if !self.expect_operand {
                        return unexpected(token, span, &["an operator", "`)`", "`,`"]);
                    }

                    self.operators.push(Pending::LParen(span));

                    // `f()` closes right away; the argument counter drops to zero
                    if matches!(self.current_token, Some((_, Token::RParen, _))) {
                        if let Some(Pending::Function { args, .. }) = self.operators.iter_mut().rev().nth(1) {
                            *args = 0;
                            self.expect_operand = false;
                        }
                    }
                },
                Token::RParen => self.close_paren(span)?,
                Token::Comma => self.comma(span)?,
                Token::Operator(Operator::Equals) => {
                    return unexpected(token, span, &["an operator", "an operand"]);
                },
                Token::Operator(operator) => self.push_operator(operator, token, span)?,
            }
        }

        self.finish(last_end)
    }

    fn push_operand(&mut self, operand: Expr, token: Token, span: SrcSpan) -> Result<(), ParseError> {
        if !self.expect_operand {
            return unexpected(token, span, &["an operator", "`)`", "`,`"]);
        }

        self.output.push(operand);
        self.expect_operand = false;

        Ok(())
    }

    fn push_operator(&mut self, operator: Operator, token: Token, span: SrcSpan) -> Result<(), ParseError> {
        if self.expect_operand {
            return match operator {
                Operator::Minus => {
                    self.operators.push(Pending::Neg(span));
                    Ok(())
                },
                // unary plus changes nothing
                Operator::Plus => Ok(()),
                _ => unexpected(token, span, &["a Number", "a Variable", "`(`", "`-`"])
            };
        }

        let op = match BinaryOp::from_operator(operator) {
            Some(op) => op,
            None => return unexpected(token, span, &["an operator"])
        };

        while let Some(top) = self.operators.last().and_then(Pending::precedence) {
            let should_fold = top > op.precedence()
                || (top == op.precedence() && !op.is_right_assoc());

            if !should_fold {
                break;
            }

            self.fold_top()?;
        }

        self.operators.push(Pending::Binary(op, span));
        self.expect_operand = true;

        Ok(())
    }

    /// Folds operators down to the nearest `(`, leaving it on the stack.
    fn fold_to_paren(&mut self) -> Result<Option<SrcSpan>, ParseError> {
        loop {
            match self.operators.last() {
                Some(Pending::LParen(span)) => return Ok(Some(*span)),
                Some(Pending::Function { span, .. }) => {
                    // a function never sits on top without its `(`
                    return parse_error(ParseErrorType::MissingOperand, *span);
                },
                Some(_) => self.fold_top()?,
                None => return Ok(None)
            }
        }
    }

    fn comma(&mut self, span: SrcSpan) -> Result<(), ParseError> {
        if self.expect_operand {
            return unexpected(Token::Comma, span, &["a Number", "a Variable", "`(`"]);
        }

        if self.fold_to_paren()?.is_none() {
            return parse_error(ParseErrorType::MisplacedComma, span);
        }

        let depth = self.operators.len();
        match depth.checked_sub(2).and_then(|idx| self.operators.get_mut(idx)) {
            Some(Pending::Function { args, .. }) => *args += 1,
            _ => return parse_error(ParseErrorType::MisplacedComma, span)
        }

        self.expect_operand = true;

        Ok(())
    }

    fn close_paren(&mut self, span: SrcSpan) -> Result<(), ParseError> {
        if self.expect_operand {
            return unexpected(Token::RParen, span, &["a Number", "a Variable", "`(`"]);
        }

        if self.fold_to_paren()?.is_none() {
            return parse_error(ParseErrorType::UnmatchedCloseParen, span);
        }

        let _ = self.operators.pop();

        if let Some(Pending::Function { function, args, span: fn_span }) = self.operators.last().cloned() {
            let _ = self.operators.pop();

            if self.output.len() < args {
                return parse_error(ParseErrorType::MissingOperand, fn_span);
            }

            let args = self.output.split_off(self.output.len() - args);
            self.output.push(Expr::call(function, args));
        }

        self.expect_operand = false;

        Ok(())
    }

    fn fold_top(&mut self) -> Result<(), ParseError> {
        match self.operators.pop() {
            Some(Pending::Binary(op, span)) => {
                let right = self.output.pop();
                let left = self.output.pop();

                match (left, right) {
                    (Some(left), Some(right)) => self.output.push(Expr::binary(op, left, right)),
                    _ => return parse_error(ParseErrorType::MissingOperand, span)
                }
            },
            Some(Pending::Neg(span)) => match self.output.pop() {
                Some(operand) => self.output.push(Expr::neg(operand)),
                None => return parse_error(ParseErrorType::MissingOperand, span)
            },
            Some(Pending::LParen(span)) => {
                return parse_error(ParseErrorType::UnmatchedOpenParen, span);
            },
            Some(Pending::Function { span, .. }) => {
                return parse_error(ParseErrorType::UnmatchedOpenParen, span);
            },
            None => {}
        }

        Ok(())
    }

    fn finish(&mut self, end: u32) -> Result<Expr, ParseError> {
        if self.output.is_empty() && self.operators.is_empty() {
            return parse_error(ParseErrorType::EmptyExpression, SrcSpan::from(0, end));
        }

        if self.expect_operand {
            return parse_error(ParseErrorType::UnexpectedEof, SrcSpan::from(end, end));
        }

        while !self.operators.is_empty() {
            self.fold_top()?;
        }

        match (self.output.pop(), self.output.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => parse_error(ParseErrorType::MissingOperand, SrcSpan::from(0, end))
        }
    }
}

/// Parses a bare token sequence; spans in errors are token indices.
pub fn parse(tokens: impl IntoIterator<Item = Token>) -> Result<Expr, ParseError> {
    let spanned = tokens.into_iter()
        .enumerate()
        .map(|(idx, token)| Ok((idx as u32, token, idx as u32 + 1)));

    Parser::new(spanned).parse()
}

/// Lexes and parses plain grammar, without any markup rewriting.
pub fn parse_str(src: &str) -> Result<Expr, ParseError> {
    Parser::new(lex(src)).parse()
}

/// Lexes and parses `src`, rewriting markup notation first when present.
pub fn parse_expression(src: &str) -> Result<Expr, ParseError> {
    parse_str(&markup::prelude::prepare(src))
}

fn unexpected<R>(token: Token, span: SrcSpan, expected: &[&str]) -> Result<R, ParseError> {
    parse_error(
        ParseErrorType::UnexpectedToken {
            token,
            expected: expected.iter().map(|s| s.to_string()).collect(),
        },
        span
    )
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
