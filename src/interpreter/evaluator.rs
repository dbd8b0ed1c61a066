/// Binary operator evaluation logic.
///
/// Handles checked and wrapping arithmetic, exponentiation, concatenation,
/// comparisons and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements checked numeric negation and logical NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation engine, the runtime context, statement
/// execution and scoping.
pub mod core;

/// Evaluation of loop expressions.
///
/// Supports `for` over ranges and collections as well as `while`, binding the
/// loop variable in a fresh scope per iteration.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Collection literals, indexing and reserved names.
pub mod utils;

/// Function evaluation.
///
/// Handles closure and builtin calls, argument checking, and the builtin
/// library including currying.
pub mod function;
