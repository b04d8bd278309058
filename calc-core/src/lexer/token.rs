use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <digits>[.<digits>][(e|E)[+|-]<digits>]
    Number(f64),
    Operator(Operator),
    Function(Function),
    Constant(Constant),
    // (<letter>|_){<letter>|<digit>|_}
    Variable(String),

    LParen, // (
    RParen, // )
    Comma, // ,
}

impl Token {
    pub fn as_literal(&self) -> String {
        match self {
            Token::Number(value) => format!("{}", value),
            Token::Operator(op) => op.symbol().to_string(),
            Token::Function(function) => function.name().to_string(),
            Token::Constant(constant) => constant.name().to_string(),
            Token::Variable(name) => name.clone(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Caret, // ^
    Equals, // =
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Star,
            '/' => Self::Slash,
            '^' => Self::Caret,
            '=' => Self::Equals,
            _ => return None
        })
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Star => '*',
            Self::Slash => '/',
            Self::Caret => '^',
            Self::Equals => '=',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
    Inf,
    Nan,
}

impl Constant {
    pub const ALL: [Constant; 4] = [Self::Pi, Self::E, Self::Inf, Self::Nan];

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "pi" => Self::Pi,
            "e" => Self::E,
            "inf" => Self::Inf,
            "nan" => Self::Nan,
            _ => return None
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
            Self::Inf => "inf",
            Self::Nan => "nan",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
            Self::Inf => f64::INFINITY,
            Self::Nan => f64::NAN,
        }
    }
}

/// Number of arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::Range(min, max) => write!(f, "{min} to {max}"),
            Arity::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

macro_rules! functions {
    ($($variant:ident => $name:literal, $arity:expr;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Function {
            $($variant,)*
        }

        impl Function {
            pub const ALL: &'static [Function] = &[$(Function::$variant,)*];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Function::$variant),)*
                    _ => None
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Function::$variant => $name,)*
                }
            }

            pub fn arity(&self) -> Arity {
                match self {
                    $(Function::$variant => $arity,)*
                }
            }
        }
    };
}

functions! {
    Sin => "sin", Arity::Exact(1);
    Cos => "cos", Arity::Exact(1);
    Tan => "tan", Arity::Exact(1);
    Asin => "asin", Arity::Exact(1);
    Acos => "acos", Arity::Exact(1);
    Atan => "atan", Arity::Exact(1);
    Atan2 => "atan2", Arity::Exact(2);
    Sinh => "sinh", Arity::Exact(1);
    Cosh => "cosh", Arity::Exact(1);
    Tanh => "tanh", Arity::Exact(1);
    Asinh => "asinh", Arity::Exact(1);
    Acosh => "acosh", Arity::Exact(1);
    Atanh => "atanh", Arity::Exact(1);
    Exp => "exp", Arity::Exact(1);
    Ln => "ln", Arity::Exact(1);
    Log => "log", Arity::Range(1, 2);
    Log10 => "log10", Arity::Exact(1);
    Log2 => "log2", Arity::Exact(1);
    Sqrt => "sqrt", Arity::Exact(1);
    Cbrt => "cbrt", Arity::Exact(1);
    Pow => "pow", Arity::Exact(2);
    Abs => "abs", Arity::Exact(1);
    Sign => "sign", Arity::Exact(1);
    Floor => "floor", Arity::Exact(1);
    Ceil => "ceil", Arity::Exact(1);
    Round => "round", Arity::Exact(1);
    Trunc => "trunc", Arity::Exact(1);
    Min => "min", Arity::AtLeast(1);
    Max => "max", Arity::AtLeast(1);
    Clamp => "clamp", Arity::Exact(3);
    Lerp => "lerp", Arity::Exact(3);
    Rad => "rad", Arity::Exact(1);
    Deg => "deg", Arity::Exact(1);
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
