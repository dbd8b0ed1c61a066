use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
};

/// Compares two values for ordering.
///
/// Numbers compare numerically (mixed operands are promoted to float),
/// strings lexicographically and characters by code point. `None` means the
/// values are unordered, which only happens for `NaN`.
///
/// # Errors
/// `TypeMismatch` when the values cannot be ordered against each other.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use slate::interpreter::{evaluator::binary::comparison::compare_values, value::core::Value};
///
/// assert_eq!(compare_values(&Value::Integer(1), &Value::Float(1.5), 1).unwrap(),
///            Some(Ordering::Less));
/// assert_eq!(compare_values(&Value::from("b"), &Value::from("a"), 1).unwrap(),
///            Some(Ordering::Greater));
/// assert!(compare_values(&Value::from("b"), &Value::Integer(1), 1).is_err());
/// ```
pub fn compare_values(left: &Value, right: &Value, line: usize) -> EvalResult<Option<Ordering>> {
    ordering_for(BinaryOperator::Less, left, right, line)
}

fn ordering_for(op: BinaryOperator,
                left: &Value,
                right: &Value,
                line: usize)
                -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        (Value::Character(a), Value::Character(b)) => Ok(Some(a.cmp(b))),
        _ if left.is_numeric() && right.is_numeric() => {
            Ok(left.as_float(line)?.partial_cmp(&right.as_float(line)?))
        },
        _ => Err(unsupported_operands(op, left, right, line)),
    }
}

/// Language-level equality.
///
/// Like structural equality, except that an integer and a float are equal
/// when they denote the same number, also inside arrays and maps. Values of
/// unrelated types are simply unequal.
pub fn values_equal(left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(_), Value::Float(_)) | (Value::Float(_), Value::Integer(_)) => {
            Ok(left.as_float(line)? == right.as_float(line)?)
        },
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for (x, y) in a.iter().zip(b.iter()) {
                if !values_equal(x, y, line)? {
                    return Ok(false);
                }
            }
            Ok(true)
        },
        (Value::Map(a), Value::Map(b)) => {
            if a.len() != b.len() {
                return Ok(false);
            }
            for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                if ka != kb || !values_equal(va, vb, line)? {
                    return Ok(false);
                }
            }
            Ok(true)
        },
        _ => Ok(left == right),
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` accept any operands (see [`values_equal`]); the ordering
    /// operators accept numbers, strings and characters (see
    /// [`compare_values`]).
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less,
    ///                                       &Value::Float(3.0),
    ///                                       &Value::Integer(5),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal,
    ///                                       &Value::Integer(1),
    ///                                       &Value::from("1"),
    ///                                       1);
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        if matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) {
            let equal = values_equal(left, right, line)?;
            return Ok(Value::Bool((op == BinaryOperator::Equal) == equal));
        }

        let ordering = ordering_for(op, left, right, line)?;

        Ok(Value::Bool(match ordering {
                           None => false,
                           Some(ordering) => match op {
                               BinaryOperator::Less => ordering.is_lt(),
                               BinaryOperator::Greater => ordering.is_gt(),
                               BinaryOperator::LessEqual => ordering.is_le(),
                               BinaryOperator::GreaterEqual => ordering.is_ge(),
                               _ => return Err(unsupported_operands(op, left, right, line)),
                           },
                       }))
    }
}
