use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
    util::num::i64_to_u32_checked,
};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation uses checked arithmetic. Negative integer
    /// exponents are computed in floating-point form. In all other numeric
    /// cases, operands are promoted to floats and evaluated with `powf`.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10), 1).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1), 1).unwrap();
    /// assert_eq!(result, Value::Float(0.5));
    ///
    /// assert!(Context::eval_pow(&Value::Integer(2), &Value::Integer(64), 1).is_err());
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, line: usize) -> EvalResult<Value> {
        use Value::{Float, Integer};

        match (base, exponent) {
            (Integer(b), Integer(e)) => {
                if *e < 0 {
                    Ok(Float(base.as_float(line)?.powf(exponent.as_float(line)?)))
                } else {
                    b.checked_pow(i64_to_u32_checked(*e, line)?)
                     .map(Integer)
                     .ok_or(RuntimeError::ArithmeticOverflow { line })
                }
            },
            _ if base.is_numeric() && exponent.is_numeric() => {
                Ok(Float(base.as_float(line)?.powf(exponent.as_float(line)?)))
            },
            _ => Err(unsupported_operands(crate::ast::BinaryOperator::Pow, base, exponent, line)),
        }
    }
}
