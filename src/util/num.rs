use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use slate::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` to `i64`, truncating toward zero.
///
/// Non-finite inputs are rejected as invalid arguments and values outside the
/// `i64` range as arithmetic overflow.
///
/// ## Example
/// ```
/// use slate::{error::RuntimeError, util::num::f64_to_i64_truncating};
///
/// assert_eq!(f64_to_i64_truncating(2.9, 1).unwrap(), 2);
/// assert_eq!(f64_to_i64_truncating(-2.9, 1).unwrap(), -2);
///
/// let err = f64_to_i64_truncating(1e20, 4).unwrap_err();
/// assert_eq!(err, RuntimeError::ArithmeticOverflow { line: 4 });
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncating(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot convert non-finite value {value} to an integer"),
                                                   line });
    }
    let truncated = value.trunc();
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::ArithmeticOverflow { line });
    }
    Ok(truncated as i64)
}

/// Converts a non-negative `i64` exponent to `u32`.
///
/// ## Example
/// ```
/// use slate::util::num::i64_to_u32_checked;
///
/// assert_eq!(i64_to_u32_checked(45, 5).unwrap(), 45);
/// assert!(i64_to_u32_checked(i64::MAX, 5).is_err());
/// ```
pub fn i64_to_u32_checked(value: i64, line: usize) -> EvalResult<u32> {
    u32::try_from(value).map_err(|_| RuntimeError::ArithmeticOverflow { line })
}

/// Converts a collection length to `i64`.
pub fn usize_to_i64_checked(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::ArithmeticOverflow { line })
}

/// Largest string (in bytes) or array (in elements) a single operation may
/// build.
pub const MAX_LENGTH: usize = 1 << 24;

/// Validates the length of a string or array about to be built.
///
/// `length` is `None` when computing it already overflowed.
///
/// ## Example
/// ```
/// use slate::{error::RuntimeError, util::num::{MAX_LENGTH, checked_length}};
///
/// assert_eq!(checked_length(2usize.checked_mul(3), 1).unwrap(), 6);
/// assert_eq!(checked_length(usize::MAX.checked_add(1), 2).unwrap_err(),
///            RuntimeError::ArithmeticOverflow { line: 2 });
/// assert!(matches!(checked_length(Some(MAX_LENGTH + 1), 3),
///                  Err(RuntimeError::InvalidArgument { line: 3, .. })));
/// ```
pub fn checked_length(length: Option<usize>, line: usize) -> EvalResult<usize> {
    match length {
        None => Err(RuntimeError::ArithmeticOverflow { line }),
        Some(length) if length > MAX_LENGTH => {
            Err(RuntimeError::InvalidArgument { details: format!("result length {length} exceeds the limit of {MAX_LENGTH}"),
                                                line })
        },
        Some(length) => Ok(length),
    }
}

/// Validates `index` against a collection of length `len`.
///
/// Negative indices are never valid; there is no wrap-around indexing.
///
/// ## Example
/// ```
/// use slate::{error::RuntimeError, util::num::checked_index};
///
/// assert_eq!(checked_index(2, 3, 1).unwrap(), 2);
///
/// let err = checked_index(-1, 3, 7).unwrap_err();
/// assert_eq!(err,
///            RuntimeError::IndexOutOfBounds { len:   3,
///                                             found: -1,
///                                             line:  7, });
/// ```
pub fn checked_index(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|i| *i < len)
                          .ok_or(RuntimeError::IndexOutOfBounds { len,
                                                                  found: index,
                                                                  line })
}

/// Integer division truncating toward zero.
///
/// ## Errors
/// `DivideByZero` when `divisor` is zero, `ArithmeticOverflow` for
/// `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use slate::util::num::checked_div;
///
/// assert_eq!(checked_div(-7, 2, 1).unwrap(), -3);
/// assert!(checked_div(1, 0, 1).is_err());
/// assert!(checked_div(i64::MIN, -1, 1).is_err());
/// ```
pub const fn checked_div(dividend: i64, divisor: i64, line: usize) -> EvalResult<i64> {
    if divisor == 0 {
        return Err(RuntimeError::DivideByZero { line });
    }
    match dividend.checked_div(divisor) {
        Some(quotient) => Ok(quotient),
        None => Err(RuntimeError::ArithmeticOverflow { line }),
    }
}

/// Integer remainder with the sign of the dividend (C-style `%`).
///
/// ## Errors
/// `DivideByZero` when `divisor` is zero, `ArithmeticOverflow` for
/// `i64::MIN % -1`.
///
/// ## Example
/// ```
/// use slate::util::num::checked_rem;
///
/// assert_eq!(checked_rem(-7, 2, 1).unwrap(), -1);
/// assert_eq!(checked_rem(7, -2, 1).unwrap(), 1);
/// ```
pub const fn checked_rem(dividend: i64, divisor: i64, line: usize) -> EvalResult<i64> {
    if divisor == 0 {
        return Err(RuntimeError::DivideByZero { line });
    }
    match dividend.checked_rem(divisor) {
        Some(remainder) => Ok(remainder),
        None => Err(RuntimeError::ArithmeticOverflow { line }),
    }
}
