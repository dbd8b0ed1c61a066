/// Runtime value representation.
///
/// Defines [`core::Value`], its conversions, and how values are displayed in
/// annotations and by `print`.
pub mod core;

/// Map key representation.
///
/// Defines the `MapKey` type used for the keys of a `Value::Map`. Only scalar
/// values with a total order can be keys, which keeps maps deterministic.
pub mod map_key;

/// Closure values.
///
/// A closure pairs a parameter list and a body with the environment it was
/// created in.
pub mod closure;
