use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        function::core::expect_args,
    },
    value::core::Value,
};

/// Appends the display text of a value to the output log and returns unit.
///
/// The text is collected by the [`Context`] rather than written to standard
/// output, so callers can attach it to the statement that produced it.
///
/// # Parameters
/// - `ctx`: The context receiving the output.
/// - `args`: Slice containing one argument.
/// - `line`: Line number for error reporting.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::print::print},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let result = print(&mut context, &[Value::from("hi")], 1).unwrap();
///
/// assert_eq!(result, Value::Unit);
/// assert_eq!(context.take_output(), vec!["hi".to_string()]);
/// ```
pub fn print(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = expect_args::<1>("print", args, line)?;

    ctx.emit(value.to_string());
    Ok(Value::Unit)
}
