use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::expect_args,
        },
        value::core::Value,
    },
    util::num::{checked_length, f64_to_i64_truncating, usize_to_i64_checked},
};

/// Asserts that a boolean argument is true.
///
/// Accepts exactly one argument.
/// If the value is false, an `AssertionFailed` error is returned.
/// If it is true, the function returns the value unchanged.
///
/// # Parameters
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::Bool(true)` on success.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::builtin::assert_fn},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let r = assert_fn(&mut context, &[Value::Bool(true)], 1).unwrap();
/// assert_eq!(r, Value::Bool(true));
///
/// assert!(assert_fn(&mut context, &[Value::Bool(false)], 1).is_err());
/// ```
pub fn assert_fn(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("assert", args, line)?;

    if !value.as_bool(line)? {
        return Err(RuntimeError::AssertionFailed { line });
    }
    Ok(value.clone())
}

/// Returns the number of elements of an array or map, or the number of
/// characters of a string.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::builtin::len},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// assert_eq!(len(&mut context, &[Value::from("héllo")], 1).unwrap(), Value::Integer(5));
/// assert!(len(&mut context, &[Value::Integer(5)], 1).is_err());
/// ```
pub fn len(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("len", args, line)?;

    let count = match value {
        Value::Array(a) => a.len(),
        Value::Map(m) => m.len(),
        Value::Str(s) => s.chars().count(),
        other => {
            return Err(RuntimeError::type_mismatch(format!("'len' expects an Array, Map or String, found {}",
                                                           other.type_name()),
                                                   line));
        },
    };
    Ok(Value::Integer(usize_to_i64_checked(count, line)?))
}

/// Converts any value to its display text.
pub fn str_fn(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("str", args, line)?;
    Ok(Value::from(value.to_string()))
}

/// Converts a value to an integer.
///
/// - Integers are returned unchanged.
/// - Floats are truncated toward zero; out-of-range results are
///   `ArithmeticOverflow` and non-finite values `InvalidArgument`.
/// - Characters yield their code point.
/// - Strings are parsed as decimal integers, ignoring surrounding whitespace.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::builtin::int},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// assert_eq!(int(&mut context, &[Value::Float(-2.7)], 1).unwrap(), Value::Integer(-2));
/// assert_eq!(int(&mut context, &[Value::from('A')], 1).unwrap(), Value::Integer(65));
/// assert_eq!(int(&mut context, &[Value::from(" 42 ")], 1).unwrap(), Value::Integer(42));
/// assert!(int(&mut context, &[Value::from("4x")], 1).is_err());
/// ```
pub fn int(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("int", args, line)?;

    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(x) => Ok(Value::Integer(f64_to_i64_truncating(*x, line)?)),
        Value::Character(c) => Ok(Value::Integer(i64::from(u32::from(*c)))),
        Value::Str(s) => {
            s.trim()
             .parse::<i64>()
             .map(Value::Integer)
             .map_err(|_| RuntimeError::InvalidArgument { details: format!("cannot convert {:?} to an integer", &**s),
                                                          line })
        },
        other => Err(RuntimeError::type_mismatch(format!("cannot convert {} to an integer",
                                                         other.type_name()),
                                                 line)),
    }
}

/// Converts a value to a float.
///
/// Integers are promoted with a checked conversion; strings are parsed.
pub fn float(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("float", args, line)?;

    match value {
        Value::Integer(_) | Value::Float(_) => Ok(Value::Float(value.as_float(line)?)),
        Value::Str(s) => {
            s.trim()
             .parse::<f64>()
             .ok()
             .filter(|x| x.is_finite())
             .map(Value::Float)
             .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("cannot convert {:?} to a float", &**s),
                                                            line })
        },
        other => Err(RuntimeError::type_mismatch(format!("cannot convert {} to a float",
                                                         other.type_name()),
                                                 line)),
    }
}

/// Returns the absolute value of a number.
///
/// `abs` of the smallest integer has no positive counterpart and is an
/// `ArithmeticOverflow`.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::builtin::abs},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// assert_eq!(abs(&mut context, &[Value::Integer(-3)], 1).unwrap(), Value::Integer(3));
/// assert!(abs(&mut context, &[Value::Integer(i64::MIN)], 1).is_err());
/// ```
pub fn abs(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("abs", args, line)?;

    match value {
        Value::Integer(n) => n.checked_abs()
                              .map(Value::Integer)
                              .ok_or(RuntimeError::ArithmeticOverflow { line }),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(RuntimeError::type_mismatch(format!("'abs' expects a number, found {}",
                                                         other.type_name()),
                                                 line)),
    }
}

/// Repeats a string `n` times.
///
/// A negative count, or a result longer than
/// [`MAX_LENGTH`](crate::util::num::MAX_LENGTH) bytes, is an
/// `InvalidArgument`.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::builtin::repeat},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let r = repeat(&mut context, &[Value::from("ab"), Value::Integer(3)], 1).unwrap();
/// assert_eq!(r, Value::from("ababab"));
/// ```
pub fn repeat(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [text, count] = expect_args::<2>("repeat", args, line)?;

    let text = text.as_str(line)?;
    let count = count.as_integer(line)?;
    let count = usize::try_from(count).map_err(|_| RuntimeError::InvalidArgument { details: format!("repeat count must not be negative, found {count}"),
                                                                                  line })?;
    checked_length(text.len().checked_mul(count), line)?;
    Ok(Value::from(text.repeat(count)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::util::num::MAX_LENGTH;

    fn call(f: fn(&mut Context, &[Value], usize) -> EvalResult<Value>, args: &[Value]) -> EvalResult<Value> {
        f(&mut Context::new(), args, 3)
    }

    #[test]
    fn repeat_rejects_oversized_results() {
        let huge = call(repeat, &[Value::from("ab"), Value::Integer(1 << 62)]);
        assert!(matches!(huge, Err(RuntimeError::InvalidArgument { line: 3, .. })));

        let wrapping = call(repeat, &[Value::from("abc"), Value::Integer(i64::MAX)]);
        assert_eq!(wrapping, Err(RuntimeError::ArithmeticOverflow { line: 3 }));

        let limit = i64::try_from(MAX_LENGTH).unwrap();
        let largest = call(repeat, &[Value::from("x"), Value::Integer(limit)]).unwrap();
        assert_eq!(largest.as_str(1).unwrap().len(), MAX_LENGTH);

        assert!(matches!(call(repeat, &[Value::from("x"), Value::Integer(-1)]),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert_eq!(call(repeat, &[Value::from("ab"), Value::Integer(0)]), Ok(Value::from("")));
    }

    #[test]
    fn int_conversions_at_their_bounds() {
        assert_eq!(call(int, &[Value::from(" -42 ")]), Ok(Value::Integer(-42)));
        assert_eq!(call(int, &[Value::Float(-2.9)]), Ok(Value::Integer(-2)));
        assert_eq!(call(int, &[Value::Float(1e19)]),
                   Err(RuntimeError::ArithmeticOverflow { line: 3 }));
        assert!(matches!(call(int, &[Value::Float(f64::NAN)]),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(call(int, &[Value::from("9223372036854775808")]),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(call(int, &[Value::from("12abc")]),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(call(int, &[Value::Unit]), Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn float_conversions_at_their_bounds() {
        assert_eq!(call(float, &[Value::Integer(1 << 53)]), Ok(Value::Float(9_007_199_254_740_992.0)));
        assert_eq!(call(float, &[Value::Integer(i64::MAX)]),
                   Err(RuntimeError::ArithmeticOverflow { line: 3 }));
        assert_eq!(call(float, &[Value::from("2.5e3")]), Ok(Value::Float(2500.0)));
        for text in ["inf", "NaN", "", "1.2.3"] {
            assert!(matches!(call(float, &[Value::from(text)]),
                             Err(RuntimeError::InvalidArgument { .. })),
                    "{text:?}");
        }
    }
}
