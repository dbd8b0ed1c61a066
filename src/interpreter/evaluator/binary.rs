/// Operator dispatch and short-circuit evaluation.
pub mod core;

/// Checked and wrapping integer arithmetic and float arithmetic.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Ordering and equality.
pub mod comparison;

/// Logical operators.
pub mod logic;

/// String and array concatenation.
pub mod concat;
