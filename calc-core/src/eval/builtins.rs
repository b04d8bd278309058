//! The fixed builtin table shared by the interpreter and the JIT shims.

use std::f64::consts::PI;

use crate::lexer::prelude::Function;

use super::error::EvalError;

pub fn sinh(x: f64) -> f64 {
    (x.exp() - (-x).exp()) / 2.0
}

pub fn cosh(x: f64) -> f64 {
    (x.exp() + (-x).exp()) / 2.0
}

pub fn tanh(x: f64) -> f64 {
    // saturates to ±1 instead of inf/inf
    1.0 - 2.0 / ((2.0 * x).exp() + 1.0)
}

pub fn asinh(x: f64) -> f64 {
    (x + (x * x + 1.0).sqrt()).ln()
}

pub fn acosh(x: f64) -> f64 {
    (x + (x * x - 1.0).sqrt()).ln()
}

pub fn atanh(x: f64) -> f64 {
    0.5 * ((1.0 + x) / (1.0 - x)).ln()
}

pub fn log2(x: f64) -> f64 {
    x.log2()
}

pub fn cbrt(x: f64) -> f64 {
    x.cbrt()
}

pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        // keeps 0 and nan as they are
        x
    }
}

/// Rounds half away from zero.
pub fn round(x: f64) -> f64 {
    x.round()
}

pub fn trunc(x: f64) -> f64 {
    x.trunc()
}

pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// Applies `function` to already evaluated arguments.
pub fn call(function: Function, args: &[f64]) -> Result<f64, EvalError> {
    let arity = function.arity();

    if !arity.accepts(args.len()) {
        return Err(EvalError::ArityMismatch {
            function,
            expected: arity,
            got: args.len(),
        });
    }

    let x = args[0];

    Ok(match function {
        Function::Sin => x.sin(),
        Function::Cos => x.cos(),
        Function::Tan => x.tan(),
        Function::Asin => x.asin(),
        Function::Acos => x.acos(),
        Function::Atan => x.atan(),
        Function::Atan2 => x.atan2(args[1]),
        Function::Sinh => sinh(x),
        Function::Cosh => cosh(x),
        Function::Tanh => tanh(x),
        Function::Asinh => asinh(x),
        Function::Acosh => acosh(x),
        Function::Atanh => atanh(x),
        Function::Exp => x.exp(),
        Function::Ln => x.ln(),
        Function::Log => match args.get(1) {
            Some(base) => x.ln() / base.ln(),
            None => x.ln(),
        },
        Function::Log10 => x.log10(),
        Function::Log2 => log2(x),
        Function::Sqrt => x.sqrt(),
        Function::Cbrt => cbrt(x),
        Function::Pow => pow(x, args[1]),
        Function::Abs => x.abs(),
        Function::Sign => sign(x),
        Function::Floor => x.floor(),
        Function::Ceil => x.ceil(),
        Function::Round => round(x),
        Function::Trunc => trunc(x),
        Function::Min => args[1..].iter().fold(x, |acc, arg| acc.min(*arg)),
        Function::Max => args[1..].iter().fold(x, |acc, arg| acc.max(*arg)),
        Function::Clamp => clamp(x, args[1], args[2]),
        Function::Lerp => lerp(x, args[1], args[2]),
        Function::Rad => x * PI / 180.0,
        Function::Deg => x * 180.0 / PI,
    })
}
