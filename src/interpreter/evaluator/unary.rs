use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation for integers and floats. Negating
    ///   `i64::MIN` overflows and is reported as `ArithmeticOverflow`.
    /// - `Not`: boolean negation; the operand must be a `Bool`.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::UnaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// let overflow = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(i64::MIN), 3);
    /// assert_eq!(overflow, Err(RuntimeError::ArithmeticOverflow { line: 3 }));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::ArithmeticOverflow { line }),
                Value::Float(x) => Ok(Value::Float(-x)),
                other => Err(RuntimeError::type_mismatch(format!("cannot negate {}",
                                                                 other.type_name()),
                                                         line)),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
