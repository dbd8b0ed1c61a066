use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::unsupported_operands,
            core::{Context, EvalResult},
        },
        value::core::Value,
    },
    util::num::checked_length,
};

impl Context {
    /// Concatenates two strings or two arrays with `+`.
    ///
    /// The operands are not modified; a new value is returned.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let left = Value::from(vec![Value::Integer(1)]);
    /// let right = Value::from(vec![Value::Integer(2)]);
    ///
    /// assert_eq!(Context::eval_concat(&left, &right, 1).unwrap(),
    ///            Value::from(vec![Value::Integer(1), Value::Integer(2)]));
    /// ```
    pub fn eval_concat(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => {
                let length = checked_length(a.len().checked_add(b.len()), line)?;
                let mut joined = String::with_capacity(length);
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::from(joined))
            },
            (Value::Array(a), Value::Array(b)) => {
                let length = checked_length(a.len().checked_add(b.len()), line)?;
                let mut joined = Vec::with_capacity(length);
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(Value::Array(Rc::new(joined)))
            },
            _ => Err(unsupported_operands(BinaryOperator::Add, left, right, line)),
        }
    }
}
