use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::comparison::compare_values, core::EvalResult, function::core::expect_args},
        value::core::Value,
    },
};

/// Computes the minimum or maximum of two numeric values.
///
/// The winning argument is returned unchanged, so `min(1, 2.5)` is the
/// integer `1`. Mixed operands are compared after promoting the integer to a
/// float. On a tie the first argument wins.
///
/// The operation is selected by the `name` parameter, which must be `"min"` or
/// `"max"`. Non-numeric arguments produce a `TypeMismatch`, and `NaN` an
/// `InvalidArgument`.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: Slice containing exactly two arguments.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let r = min_max("min", &[Value::Integer(3), Value::Integer(7)], 1).unwrap();
/// assert_eq!(r, 3.into());
///
/// let r = min_max("max", &[Value::Float(2.5), Value::Integer(1)], 1).unwrap();
/// assert_eq!(r, 2.5.into());
/// ```
pub fn min_max(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let [left, right] = expect_args::<2>(name, args, line)?;

    for value in [left, right] {
        if !value.is_numeric() {
            return Err(RuntimeError::type_mismatch(format!("'{name}' expects numbers, found {}",
                                                           value.type_name()),
                                                   line));
        }
    }

    let ordering = compare_values(left, right, line)?.ok_or_else(|| {
                       RuntimeError::InvalidArgument { details: format!("'{name}' of NaN"),
                                                       line }
                   })?;

    let pick_right = match name {
        "min" => ordering == Ordering::Greater,
        _ => ordering == Ordering::Less,
    };

    Ok(if pick_right { right.clone() } else { left.clone() })
}
