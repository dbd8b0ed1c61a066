use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult, Flow},
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a logical operation between two boolean values.
    ///
    /// The operands are converted to booleans using `as_bool`; there is no
    /// implicit truthiness.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_logic(BinaryOperator::Xor, &Value::Bool(true), &Value::Bool(false), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// assert!(Context::eval_logic(BinaryOperator::And, &Value::Integer(1), &Value::Bool(true), 1).is_err());
    /// ```
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      line: usize)
                      -> EvalResult<Value> {
        use BinaryOperator::{And, Or, Xor};

        let (l, r) = (left.as_bool(line)?, right.as_bool(line)?);
        match op {
            And => Ok(Value::Bool(l && r)),
            Xor => Ok(Value::Bool(l ^ r)),
            Or => Ok(Value::Bool(l || r)),
            _ => Err(unsupported_operands(op, left, right, line)),
        }
    }

    /// Evaluates `and` / `or`, skipping the right operand when the left one
    /// already decides the result.
    pub(crate) fn eval_short_circuit(&mut self,
                                     left: &Expr,
                                     op: BinaryOperator,
                                     right: &Expr,
                                     line: usize)
                                     -> Flow<Value> {
        let left = self.eval(left)?.as_bool(line)?;
        match (op, left) {
            (BinaryOperator::And, false) => Ok(Value::Bool(false)),
            (BinaryOperator::Or, true) => Ok(Value::Bool(true)),
            _ => Ok(Value::Bool(self.eval(right)?.as_bool(line)?)),
        }
    }
}
