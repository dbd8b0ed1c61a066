use thiserror::Error;

/// Represents all errors that can occur during evaluation and runtime.
///
/// Every variant carries the source line of the statement or expression that
/// failed. A failing statement never yields a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use a name that is not bound in any enclosing scope.
    #[error("Error on line {line}: Undefined identifier '{name}'.")]
    UndefinedIdentifier {
        /// The name that could not be resolved.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type mismatch: {details}.")]
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to access an array or string element outside its bounds.
    #[error("Error on line {line}: Index {found} is out of bounds for length {len}.")]
    IndexOutOfBounds {
        /// The length of the indexed collection.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division or remainder by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivideByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Checked arithmetic overflowed or underflowed.
    #[error("Error on line {line}: Arithmetic overflow while trying to compute result.")]
    ArithmeticOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a callable.
    #[error("Error on line {line}: '{name}' expects {expected} argument(s), but found {found}.")]
    ArgumentCountMismatch {
        /// Display name of the callee.
        name:     String,
        /// Human readable description of the accepted arity.
        expected: String,
        /// The number of arguments that were supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to reassign a `let` binding, a parameter or a loop variable.
    #[error("Error on line {line}: Cannot assign to immutable binding '{name}'.")]
    AssignmentToImmutable {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An assertion failed during execution.
    #[error("Error on line {line}: Assertion failed.")]
    AssertionFailed {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Nested calls exceeded the configured maximum depth.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    CallDepthExceeded {
        /// The configured limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `return` statement was executed outside of any function body.
    #[error("Error on line {line}: 'return' used outside of a function.")]
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error is attached to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedIdentifier { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::IndexOutOfBounds { line, .. }
            | Self::DivideByZero { line }
            | Self::ArithmeticOverflow { line }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::AssignmentToImmutable { line, .. }
            | Self::InvalidArgument { line, .. }
            | Self::AssertionFailed { line }
            | Self::CallDepthExceeded { line, .. }
            | Self::ReturnOutsideFunction { line } => *line,
        }
    }

    /// Shorthand for a [`RuntimeError::TypeMismatch`] with a formatted
    /// message.
    pub(crate) fn type_mismatch(details: impl Into<String>, line: usize) -> Self {
        Self::TypeMismatch { details: details.into(),
                             line }
    }
}
