mod cli;
mod rlpl;
mod rppl;

use std::{path::PathBuf, rc::Rc, time::Instant};

use clap::{Args, Parser};
use cli::{print_compiled, print_error, print_evaluating, print_solved, print_solving};
use calc_core::{
    compiler::prelude::{compile_with, CompileOptions},
    environment::prelude::Variables,
    markup::prelude::{has_markup, normalize_reporting},
    parser::prelude::{parse_str, Expr},
    solver::prelude::{parse_equation, solve_equation, solve_system, SolveOptions},
    utils::prelude::{
        load_source, source_lines, Error, SourceWarningEmitter, Warning, WarningEmitter, WarningEmitterIO
    }
};

#[derive(Parser)]
enum Command {
    /// Evaluates an expression
    Eval {
        /// Expression, plain or in markup notation
        expr: String,
        #[command(flatten)]
        bindings: Bindings,
        /// Always use the interpreter
        #[arg(long, default_value_t = false)]
        no_codegen: bool,
    },
    /// Solves a single equation
    Solve {
        /// Equation of the form `<expression> = <expression>`
        equation: String,
        #[command(flatten)]
        bindings: Bindings,
        /// Variable to solve for [default: the only unknown]
        #[arg(long = "for", value_name = "NAME")]
        solve_for: Option<String>,
        /// Starting point of the numerical solver
        #[arg(long, value_name = "X")]
        guess: Option<f64>,
        #[arg(long, value_name = "T")]
        tolerance: Option<f64>,
        #[arg(long, value_name = "N")]
        max_iterations: Option<usize>,
        /// Always use the interpreter
        #[arg(long, default_value_t = false)]
        no_codegen: bool,
    },
    /// Solves a system of equations
    System {
        equations: Vec<String>,
        /// Read equations from a file, one per line
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        bindings: Bindings,
    },
    /// Runs Read Lex Print Loop
    Tokens,
    /// Runs Read Eval Print Loop
    Repl,
    /// Prints the LLVM IR generated for an expression
    #[cfg(feature = "compiler")]
    Ir {
        expr: String,
    },
}

#[derive(Args)]
struct Bindings {
    /// Binds a variable, may be repeated
    #[arg(short = 'v', long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    variables: Vec<(String, f64)>,
}

impl Bindings {
    fn variables(&self) -> Variables {
        self.variables.iter().cloned().collect()
    }
}

fn parse_binding(text: &str) -> Result<(String, f64), String> {
    let (name, value) = text.split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{text}`"))?;

    let value = value.trim().parse::<f64>()
        .map_err(|err| format!("invalid value for `{}`: {err}", name.trim()))?;

    Ok((name.trim().to_string(), value))
}

fn main() {
    let warnings = WarningEmitter::new(Rc::new(ConsoleWarningEmitter));

    let result = match Command::parse() {
        Command::Eval { expr, bindings, no_codegen } => {
            eval(&expr, &bindings.variables(), CompileOptions { codegen: !no_codegen }, &warnings)
        },
        Command::Solve { equation, bindings, solve_for, guess, tolerance, max_iterations, no_codegen } => {
            let defaults = SolveOptions::default();
            let options = SolveOptions {
                solve_for,
                initial_guess: guess.unwrap_or(defaults.initial_guess),
                tolerance: tolerance.unwrap_or(defaults.tolerance),
                max_iterations: max_iterations.unwrap_or(defaults.max_iterations),
                codegen: !no_codegen,
                ..defaults
            };

            solve(&equation, &bindings.variables(), &options, &warnings)
        },
        Command::System { equations, file, bindings } => {
            system(equations, file, &bindings.variables(), &warnings)
        },
        Command::Tokens => rlpl::start().map_err(Error::from),
        Command::Repl => rppl::start(warnings.clone()).map_err(Error::from),
        #[cfg(feature = "compiler")]
        Command::Ir { expr } => ir(&expr),
    };

    if let Err(error) = result {
        print_error(&error);
        std::process::exit(1);
    }
}

/// Parses `src`, reporting markup commands that had to be guessed.
pub(crate) fn parse_source(name: &str, src: &str, warnings: &WarningEmitter) -> Result<Expr, Error> {
    let text = if has_markup(src) {
        let normalized = normalize_reporting(src);
        let emitter = SourceWarningEmitter::new(name, src, warnings.clone());

        normalized.unknown.into_iter().for_each(|unknown| emitter.markup(unknown));
        normalized.text
    } else {
        src.to_string()
    };

    parse_str(&text).map_err(|error| Error::Parse {
        name: name.to_string(),
        src: text.clone(),
        error,
    })
}

fn eval(src: &str, variables: &Variables, options: CompileOptions, warnings: &WarningEmitter) -> Result<(), Error> {
    print_evaluating(src);

    let expr = parse_source("<expression>", src, warnings)?;

    let start = Instant::now();
    let compiled = compile_with(&expr, options)?;
    print_compiled(compiled.strategy(), start.elapsed());

    println!("{}", compiled.evaluate(variables)?);

    Ok(())
}

fn solve(src: &str, variables: &Variables, options: &SolveOptions, warnings: &WarningEmitter) -> Result<(), Error> {
    print_solving(src);
    let start = Instant::now();

    let solution = solve_equation(src, variables, options).map_err(|error| Error::Solve {
        name: "<equation>".into(),
        src: src.to_string(),
        error,
    })?;

    print_solved(start.elapsed());

    if let Some(warning) = solution.warning() {
        SourceWarningEmitter::new("<equation>", src, warnings.clone()).solver(warning);
    }

    println!("{solution}");

    Ok(())
}

fn system(
    mut equations: Vec<String>,
    file: Option<PathBuf>,
    variables: &Variables,
    warnings: &WarningEmitter
) -> Result<(), Error> {
    if let Some(path) = file {
        let src = load_source(&path)?;
        equations.extend(source_lines(&src).into_iter().map(str::to_string));
    }

    // malformed equations are reported one by one, with their own text
    for (idx, equation) in equations.iter().enumerate() {
        parse_equation(equation).map_err(|error| Error::Solve {
            name: format!("<equation {}>", idx + 1),
            src: equation.clone(),
            error,
        })?;
    }

    print_solving(&equations.join("; "));
    let start = Instant::now();

    let solution = solve_system(equations.as_slice(), variables, &SolveOptions::default())
        .map_err(|error| Error::Solve {
            name: "<system>".into(),
            src: equations.join("\n"),
            error,
        })?;

    print_solved(start.elapsed());

    if let Some(warning) = solution.warning() {
        SourceWarningEmitter::new("<system>", equations.join("\n"), warnings.clone()).solver(warning);
    }

    println!("{solution}");

    Ok(())
}

#[cfg(feature = "compiler")]
fn ir(src: &str) -> Result<(), Error> {
    use calc_core::codegen::prelude::emit_ir;

    let expr = parse_source("<expression>", src, &WarningEmitter::null())?;

    print!("{}", emit_ir(&expr)?);

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
