/// Numeric conversion and checked-arithmetic helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without silent data loss, plus the integer division
/// and remainder primitives the evaluator builds on. All functions return a
/// `Result` carrying a `RuntimeError` on failure.
pub mod num;

/// Stack growth for the recursive parts of the parser and evaluator.
pub mod stack;
