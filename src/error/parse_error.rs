use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered, or a description of what was expected.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("Error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to bind a reserved identifier name.
    #[error("Error on line {line}: Identifier '{name}' is reserved.")]
    IdentifierReserved {
        /// The reserved identifier name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal could not be decoded (bad escape, integer too large, ...).
    #[error("Error on line {line}: Invalid literal '{literal}'.")]
    InvalidLiteral {
        /// The offending source slice.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
