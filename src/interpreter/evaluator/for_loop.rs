use tracing::trace;

use crate::{
    ast::{Expr, ForExprContext},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, Flow},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a `for` expression.
    ///
    /// A `for` expression binds a loop variable and repeatedly evaluates the
    /// loop body. Two forms are supported:
    ///
    /// 1. **Range form:** `for i in start .. end do { body }`, or `..=` for an
    ///    inclusive upper bound. Both bounds must evaluate to integers. A range
    ///    whose start is not below its end runs zero times.
    ///
    /// 2. **Collection form:** `for x in collection do { body }`. Arrays yield
    ///    their elements, strings their characters and maps their keys in
    ///    order. The collection is evaluated once, so assigning to it inside
    ///    the body does not change the iteration.
    ///
    /// The loop variable is an immutable binding in a fresh scope for each
    /// iteration, so closures created in the body capture that iteration's
    /// value.
    ///
    /// The last evaluated body value is returned, or unit when the body never
    /// runs.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::{evaluator::core::Context, parser::parse_program, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// let program = parse_program("for i in 1..=3 do { i * 10 }").unwrap();
    ///
    /// assert_eq!(context.execute(&program[0]).unwrap(), Value::Integer(30));
    /// ```
    pub(crate) fn eval_for(&mut self, context: &ForExprContext, line: usize) -> Flow<Value> {
        let mut last_value = Value::Unit;

        if let Some(end_expr) = &context.end {
            let start_value = self.eval(&context.start)?.as_integer(line)?;
            let end_value = self.eval(end_expr)?.as_integer(line)?;
            trace!(line, start_value, end_value, inclusive = context.inclusive, "range loop");

            let range: Box<dyn Iterator<Item = i64>> = if context.inclusive {
                Box::new(start_value..=end_value)
            } else {
                Box::new(start_value..end_value)
            };

            for i in range {
                last_value = self.eval_iteration(&context.var, Value::Integer(i), &context.body)?;
            }
        } else {
            let items = match self.eval(&context.start)? {
                Value::Array(elements) => elements.as_ref().clone(),
                Value::Str(s) => s.chars().map(Value::Character).collect(),
                Value::Map(entries) => entries.keys().map(Value::from).collect(),
                other => {
                    return Err(RuntimeError::type_mismatch(format!("cannot iterate over {}",
                                                                   other.type_name()),
                                                           line).into());
                },
            };

            for item in items {
                last_value = self.eval_iteration(&context.var, item, &context.body)?;
            }
        }

        Ok(last_value)
    }

    /// Evaluates `while <condition> do { body }`.
    ///
    /// The condition must evaluate to a `Bool` before every iteration. The
    /// value is that of the last body evaluation, or unit if the body never
    /// ran.
    pub(crate) fn eval_while(&mut self, condition: &Expr, body: &Expr, line: usize) -> Flow<Value> {
        let mut last_value = Value::Unit;
        while self.eval(condition)?.as_bool(line)? {
            last_value = self.eval(body)?;
        }
        Ok(last_value)
    }

    fn eval_iteration(&mut self, var: &str, item: Value, body: &Expr) -> Flow<Value> {
        let scope = self.new_scope(self.env.clone());
        scope.define(var, item, false);
        self.with_env(scope, |ctx| ctx.eval(body))
    }
}
