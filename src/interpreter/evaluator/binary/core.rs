use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates the operands of a binary expression and applies the
    /// operator.
    ///
    /// `and` and `or` short-circuit: the right operand is only evaluated
    /// when the left one does not decide the result. Every other operator
    /// evaluates both operands, left first.
    pub(crate) fn eval_binary_expr(&mut self,
                                   left: &Expr,
                                   op: BinaryOperator,
                                   right: &Expr,
                                   line: usize)
                                   -> Flow<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_short_circuit(left, op, right, line);
        }

        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Ok(Self::eval_binary(op, &left, &right, line)?)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. `+` on strings or arrays concatenates;
    /// otherwise arithmetic goes to `eval_scalar_op`, `^` to `eval_pow`,
    /// relational and equality operators to `eval_comparison`, and `xor` to
    /// `eval_logic`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use slate::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::Integer(3),
    ///                                   &Value::Integer(4),
    ///                                   1);
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add,
    ///                                   &Value::from("ab"),
    ///                                   &Value::from("cd"),
    ///                                   1);
    /// assert_eq!(result.unwrap(), Value::from("abcd"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub, WrappingAdd, WrappingMul, WrappingSub, Xor,
        };
        use Value::{Array, Str};

        match op {
            Add => match (left, right) {
                (Str(_), Str(_)) | (Array(_), Array(_)) => Self::eval_concat(left, right, line),
                _ => Self::eval_scalar_op(op, left, right, line),
            },

            Sub | Mul | Div | Mod => Self::eval_scalar_op(op, left, right, line),

            WrappingAdd | WrappingSub | WrappingMul => Self::eval_wrapping_op(op, left, right, line),

            Pow => Self::eval_pow(left, right, line),

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },

            And | Xor | Or => Self::eval_logic(op, left, right, line),
        }
    }
}

/// Builds the error for an operator applied to unsupported operand types.
pub(crate) fn unsupported_operands(op: BinaryOperator,
                                   left: &Value,
                                   right: &Value,
                                   line: usize)
                                   -> RuntimeError {
    RuntimeError::type_mismatch(format!("cannot apply '{op}' to {} and {}",
                                        left.type_name(),
                                        right.type_name()),
                                line)
}
