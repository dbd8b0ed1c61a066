//! # slate
//!
//! slate is a small expression language with immediate feedback, written in
//! Rust. Every top-level statement of a program is annotated with its value,
//! the way a playground shows results next to each line.
//!
//! The language has `let`/`var` bindings, closures that capture their
//! environment by reference, currying and partial application, checked
//! integer arithmetic with explicit wrapping operators, arrays, maps and
//! strings with value semantics.
//!
//! ```
//! use slate::{interpreter::value::core::Value, run};
//!
//! let source = r#"
//! createStringRepeater(n) = |s| repeat(s, n)
//! let twice = createStringRepeater(2)
//! twice("ab")
//! "#;
//!
//! assert_eq!(run(source).unwrap(), Value::from("abab"));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

use crate::interpreter::{evaluator::core::Context, value::core::Value};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` types that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. Every error carries the line it refers to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Wraps both kinds in a crate-level [`error::Error`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and scoped bindings.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// Installation of the `tracing` subscriber used by the binary.
pub mod logging;
/// The interactive prompt.
///
/// Reads lines with `rustyline`, waits for balanced brackets before running
/// input, and echoes printed output and values.
pub mod repl;
/// Statement-by-statement execution with per-statement annotations.
///
/// A session owns an evaluation context and records, for every top-level
/// statement, its value or error and the text it printed.
pub mod session;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize`, and `f64` without silent
///   data loss.
/// - Provide the checked integer division primitives.
pub mod util;

pub use error::Error;
pub use interpreter::parser::parse_program;

/// Parses and runs a program, returning the value of its last statement.
///
/// An empty program evaluates to unit. Output from `print` is discarded; use
/// a [`session::Session`] to observe it.
///
/// # Errors
/// The first parse error, or the runtime error of the first statement that
/// fails. Statements after a failing one are not run.
///
/// # Examples
/// ```
/// use slate::{Error, error::RuntimeError, interpreter::value::core::Value, run};
///
/// assert_eq!(run("let result = 2 + 2\nresult * 10").unwrap(), Value::Integer(40));
///
/// // 'x' is not defined.
/// assert!(matches!(run("let y = x + 1"),
///                  Err(Error::Runtime(RuntimeError::UndefinedIdentifier { .. }))));
///
/// assert_eq!(run("").unwrap(), Value::Unit);
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    let program = parse_program(source)?;
    debug!(statements = program.len(), "running program");

    let mut context = Context::new();
    let mut result = Value::Unit;
    for statement in &program {
        result = context.execute(statement)?;
    }

    Ok(result)
}
