/// Builtin table, arity checking and the call machinery for closures and
/// builtins.
pub mod core;
/// Scalar builtins: `assert`, `len`, `str`, `int`, `float`, `abs` and
/// `repeat`.
pub mod builtin;
/// The `print` function implementation.
///
/// Appends a value's display text to the context's output log.
pub mod print;
/// `min` and `max` function implementations.
///
/// Returns the smaller or larger of two numeric values.
pub mod min_max;
/// Array and map builtins.
///
/// `push`, `keys`, `values`, `has_key`, `get`, `contains` and `sorted`. None
/// of them modify their arguments; updated collections are returned as new
/// values.
pub mod collection;
/// `map`, `filter` and `reduce`.
pub mod higher_order;
/// `curry` and `partial`.
///
/// Both build ordinary closures whose bodies forward to the target function,
/// so the results are indistinguishable from closures written by hand.
pub mod curry;
