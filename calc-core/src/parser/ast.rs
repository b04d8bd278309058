use std::fmt::Display;

use crate::{
    analyzer::prelude::ValidationError,
    lexer::prelude::{Constant, Function, Operator},
};

/// Precedence of prefix negation, between `* /` and `^`.
pub const NEG_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    pub fn from_operator(operator: Operator) -> Option<Self> {
        Some(match operator {
            Operator::Plus => Self::Add,
            Operator::Minus => Self::Sub,
            Operator::Star => Self::Mul,
            Operator::Slash => Self::Div,
            Operator::Caret => Self::Pow,
            Operator::Equals => return None
        })
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let mut chars = symbol.chars();

        match (chars.next(), chars.next()) {
            (Some(ch), None) => Operator::from_char(ch).and_then(Self::from_operator),
            _ => None
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    pub fn is_right_assoc(&self) -> bool {
        matches!(self, Self::Pow)
    }

    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
}

impl UnaryOp {
    pub fn symbol(&self) -> char {
        match self {
            Self::Neg => '-',
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Neg => -value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Constant(Constant),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn neg(operand: Expr) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    }

    pub fn call(function: Function, args: Vec<Expr>) -> Self {
        Self::Call { function, args }
    }

    /// Builds a call from a function name, rejecting names outside the builtin table.
    pub fn call_named(name: &str, args: Vec<Expr>) -> Result<Self, ValidationError> {
        match Function::from_name(name) {
            Some(function) => Ok(Self::call(function, args)),
            None => Err(ValidationError::UnknownFunction { name: name.to_string() })
        }
    }

    pub fn constant_named(name: &str) -> Result<Self, ValidationError> {
        match Constant::from_name(name) {
            Some(constant) => Ok(Self::Constant(constant)),
            None => Err(ValidationError::UnknownConstant { name: name.to_string() })
        }
    }

    pub fn binary_named(symbol: &str, left: Expr, right: Expr) -> Result<Self, ValidationError> {
        match BinaryOp::from_symbol(symbol) {
            Some(op) => Ok(Self::binary(op, left, right)),
            None => Err(ValidationError::UnknownOperator { symbol: symbol.to_string() })
        }
    }

    /// Variable names in depth-first, left-to-right order of first occurrence.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = vec![];
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Variable(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            },
            Expr::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            },
            Expr::Unary { operand, .. } => operand.collect_variables(names),
            Expr::Call { args, .. } => args.iter()
                .for_each(|arg| arg.collect_variables(names)),
            Expr::Number(_) | Expr::Constant(_) => {}
        }
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Expr::Variable(var) => var == name,
            Expr::Binary { left, right, .. } => {
                left.contains_variable(name) || right.contains_variable(name)
            },
            Expr::Unary { operand, .. } => operand.contains_variable(name),
            Expr::Call { args, .. } => args.iter().any(|arg| arg.contains_variable(name)),
            Expr::Number(_) | Expr::Constant(_) => false
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { .. } => NEG_PRECEDENCE,
            // printed with a leading `-`
            Expr::Number(value) if value.is_sign_negative() && !value.is_nan() => NEG_PRECEDENCE,
            _ => ATOM_PRECEDENCE
        }
    }
}

fn write_number(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_nan() {
        write!(f, "nan")
    } else if value.is_infinite() {
        write!(f, "{}", if value > 0.0 { "inf" } else { "-inf" })
    } else {
        write!(f, "{value}")
    }
}

fn write_operand(f: &mut std::fmt::Formatter<'_>, operand: &Expr, parenthesize: bool) -> std::fmt::Result {
    if parenthesize {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(value) => write_number(f, *value),
            Expr::Constant(constant) => write!(f, "{constant}"),
            Expr::Variable(name) => write!(f, "{name}"),
            Expr::Binary { op, left, right } => {
                let precedence = op.precedence();

                // a^b^c groups to the right, so (a^b)^c keeps its parentheses
                let left_paren = left.precedence() < precedence
                    || (op.is_right_assoc() && left.precedence() == precedence);
                let right_paren = right.precedence() < precedence
                    || (!op.is_right_assoc() && right.precedence() == precedence);

                write_operand(f, left, left_paren)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right, right_paren)
            },
            Expr::Unary { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand, operand.precedence() < NEG_PRECEDENCE)
            },
            Expr::Call { function, args } => {
                let args = args.iter()
                    .map(|arg| format!("{arg}"))
                    .collect::<Vec<String>>();

                write!(f, "{}({})", function, args.join(", "))
            }
        }
    }
}
