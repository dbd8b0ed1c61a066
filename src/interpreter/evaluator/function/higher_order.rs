use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::expect_args,
        },
        value::core::Value,
    },
};

/// Applies `f` to every element of an array and collects the results.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::higher_order::map},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let words = Value::from(vec![Value::from("a"), Value::from("bcd")]);
///
/// let lengths = map(&mut context, &[words, Value::Builtin("len")], 1).unwrap();
/// assert_eq!(lengths, Value::from(vec![Value::Integer(1), Value::Integer(3)]));
/// ```
pub fn map(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [array, f] = expect_args::<2>("map", args, line)?;

    let elements = array.as_array(line)?;
    let mut mapped = Vec::with_capacity(elements.len());
    for element in elements.iter() {
        mapped.push(ctx.call_value(f, vec![element.clone()], line)?);
    }
    Ok(Value::from(mapped))
}

/// Keeps the elements of an array for which the predicate returns `true`.
///
/// The predicate must return a Bool.
pub fn filter(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [array, predicate] = expect_args::<2>("filter", args, line)?;

    let mut kept = Vec::new();
    for element in array.as_array(line)?.iter() {
        match ctx.call_value(predicate, vec![element.clone()], line)? {
            Value::Bool(true) => kept.push(element.clone()),
            Value::Bool(false) => {},
            other => {
                return Err(RuntimeError::type_mismatch(format!("'filter' predicate must return Bool, found {}",
                                                               other.type_name()),
                                                       line));
            },
        }
    }
    Ok(Value::from(kept))
}

/// Left fold: `reduce([a, b], init, f)` is `f(f(init, a), b)`.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::higher_order::reduce},
///                          parser::parse_program,
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let program = parse_program("|acc, x| acc * 10 + x").unwrap();
/// let f = context.execute(&program[0]).unwrap();
/// let digits = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
///
/// let number = reduce(&mut context, &[digits, Value::Integer(0), f], 1).unwrap();
/// assert_eq!(number, Value::Integer(123));
/// ```
pub fn reduce(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [array, init, f] = expect_args::<3>("reduce", args, line)?;

    let mut accumulator = init.clone();
    for element in array.as_array(line)?.iter() {
        accumulator = ctx.call_value(f, vec![accumulator, element.clone()], line)?;
    }
    Ok(accumulator)
}
