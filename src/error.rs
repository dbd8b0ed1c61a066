use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include syntax mistakes, unexpected tokens and invalid
/// literals, all detected before any statement is evaluated.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include undefined identifiers, division by zero, type mismatches and
/// checked-arithmetic overflow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure produced while running a program from source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The source could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement failed during evaluation.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
