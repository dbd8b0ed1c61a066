use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
    util::num::{checked_div, checked_rem},
};

impl Context {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Integer operands use checked arithmetic: results that do not fit into
    /// an `i64` are `ArithmeticOverflow`, and division or remainder by zero is
    /// `DivideByZero`. Division truncates toward zero and the remainder takes
    /// the sign of the dividend.
    ///
    /// When either operand is a float, the other is promoted with a checked
    /// conversion and the operation is performed in `f64`. Float division or
    /// remainder by zero is also `DivideByZero`.
    ///
    /// The operator must be one of `Add`, `Sub`, `Mul`, `Div` or `Mod`.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeError,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let r = Context::eval_scalar_op(BinaryOperator::Div, &Value::Integer(-7), &Value::Integer(2), 1);
    /// assert_eq!(r.unwrap(), Value::Integer(-3));
    ///
    /// let r = Context::eval_scalar_op(BinaryOperator::Mul, &Value::Float(1.5), &Value::Integer(2), 1);
    /// assert_eq!(r.unwrap(), Value::Float(3.0));
    ///
    /// let r = Context::eval_scalar_op(BinaryOperator::Add,
    ///                                 &Value::Integer(i64::MAX),
    ///                                 &Value::Integer(1),
    ///                                 2);
    /// assert_eq!(r, Err(RuntimeError::ArithmeticOverflow { line: 2 }));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};
        use Value::{Float, Integer};

        match (left, right) {
            (Integer(a), Integer(b)) => {
                let (a, b) = (*a, *b);
                let result = match op {
                    Add => a.checked_add(b),
                    Sub => a.checked_sub(b),
                    Mul => a.checked_mul(b),
                    Div => return checked_div(a, b, line).map(Integer),
                    Mod => return checked_rem(a, b, line).map(Integer),
                    _ => return Err(unsupported_operands(op, left, right, line)),
                };
                result.map(Integer)
                      .ok_or(RuntimeError::ArithmeticOverflow { line })
            },
            (Float(_), _) | (_, Float(_)) if left.is_numeric() && right.is_numeric() => {
                let a = left.as_float(line)?;
                let b = right.as_float(line)?;

                Ok(Float(match op {
                             Add => a + b,
                             Sub => a - b,
                             Mul => a * b,
                             Div | Mod => {
                                 if b == 0.0 {
                                     return Err(RuntimeError::DivideByZero { line });
                                 }
                                 if op == Div { a / b } else { a % b }
                             },
                             _ => return Err(unsupported_operands(op, left, right, line)),
                         }))
            },
            _ => Err(unsupported_operands(op, left, right, line)),
        }
    }

    /// Evaluates the wrapping operators `&+`, `&-` and `&*`.
    ///
    /// Both operands must be integers; the result wraps around on overflow
    /// using two's complement arithmetic.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let r = Context::eval_wrapping_op(BinaryOperator::WrappingAdd,
    ///                                   &Value::Integer(i64::MAX),
    ///                                   &Value::Integer(1),
    ///                                   1);
    /// assert_eq!(r.unwrap(), Value::Integer(i64::MIN));
    /// ```
    pub fn eval_wrapping_op(op: BinaryOperator,
                            left: &Value,
                            right: &Value,
                            line: usize)
                            -> EvalResult<Value> {
        let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
            return Err(unsupported_operands(op, left, right, line));
        };

        Ok(Value::Integer(match op {
                              BinaryOperator::WrappingAdd => a.wrapping_add(*b),
                              BinaryOperator::WrappingSub => a.wrapping_sub(*b),
                              BinaryOperator::WrappingMul => a.wrapping_mul(*b),
                              _ => return Err(unsupported_operands(op, left, right, line)),
                          }))
    }
}
