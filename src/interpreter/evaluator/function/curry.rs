use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{Context, EvalResult},
            function::core::{expect_args, fixed_arity},
        },
        value::{
            closure::{Closure, Function},
            core::Value,
        },
    },
};

/// Name under which the wrapped function is bound in a synthesized scope.
///
/// Synthesized names start with `%`, which the lexer never produces, so they
/// cannot clash with user bindings.
const TARGET: &str = "%target";

fn param_name(index: usize) -> String {
    format!("%{index}")
}

fn bound_name(index: usize) -> String {
    format!("%b{index}")
}

fn variable(name: String, line: usize) -> Expr {
    Expr::Variable { name, line }
}

fn closure(params: Vec<String>, body: Expr, env: Environment) -> Value {
    let function = Function { name: None,
                              params,
                              body: Rc::new(body) };
    Value::Closure(Rc::new(Closure { function: Rc::new(function),
                                     env }))
}

/// Transforms a function of `n` parameters into a chain of `n` single
/// parameter closures.
///
/// `curry(f)(a)(b)(c)` is equivalent to `f(a, b, c)`. Functions taking zero
/// or one parameter are returned unchanged.
///
/// # Errors
/// - `TypeMismatch` if the argument is not callable.
/// - `InvalidArgument` for builtins that accept a variable number of
///   arguments.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::curry::curry},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let curried = curry(&mut context, &[Value::Builtin("repeat")], 1).unwrap();
///
/// let once = context.call_value(&curried, vec![Value::from("ab")], 1).unwrap();
/// let twice = context.call_value(&once, vec![Value::Integer(2)], 1).unwrap();
///
/// assert_eq!(twice, Value::from("abab"));
/// ```
pub fn curry(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let [target] = expect_args::<1>("curry", args, line)?;

    let arity = fixed_arity(target, line)?;
    if arity <= 1 {
        return Ok(target.clone());
    }

    debug!(arity, line, "currying function");

    let env = Environment::default();
    env.define(TARGET, target.clone(), false);

    // The innermost body forwards every collected parameter to the target.
    let mut body = Expr::Call { callee:    Box::new(variable(TARGET.to_string(), line)),
                                arguments: (0..arity).map(|i| variable(param_name(i), line))
                                                     .collect(),
                                line, };
    for index in (1..arity).rev() {
        body = Expr::Closure { params: vec![param_name(index)],
                               body: Rc::new(body),
                               line };
    }

    Ok(closure(vec![param_name(0)], body, env))
}

/// Binds the leading arguments of a function.
///
/// `partial(f, a)(b, c)` is equivalent to `f(a, b, c)`. Binding every
/// argument yields a closure without parameters.
///
/// # Errors
/// - `ArgumentCountMismatch` if more arguments are bound than `f` accepts.
/// - The same errors as [`curry`] for the function itself.
///
/// # Example
/// ```
/// use slate::interpreter::{evaluator::{core::Context, function::curry::partial},
///                          value::core::Value};
///
/// let mut context = Context::new();
/// let args = [Value::Builtin("max"), Value::Integer(10)];
/// let at_least_ten = partial(&mut context, &args, 1).unwrap();
///
/// let value = context.call_value(&at_least_ten, vec![Value::Integer(3)], 1).unwrap();
/// assert_eq!(value, Value::Integer(10));
/// ```
pub fn partial(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let Some((target, bound)) = args.split_first() else {
        return Err(RuntimeError::ArgumentCountMismatch { name: "partial".to_string(),
                                                         expected: "at least 1".to_string(),
                                                         found: 0,
                                                         line });
    };

    let arity = fixed_arity(target, line)?;
    if bound.len() > arity {
        let name = match target {
            Value::Closure(c) => c.display_name().to_string(),
            Value::Builtin(name) => (*name).to_string(),
            other => other.type_name().to_string(),
        };
        return Err(RuntimeError::ArgumentCountMismatch { name,
                                                         expected: arity.to_string(),
                                                         found: bound.len(),
                                                         line });
    }

    debug!(arity, bound = bound.len(), line, "partially applying function");

    let env = Environment::default();
    env.define(TARGET, target.clone(), false);
    for (index, value) in bound.iter().enumerate() {
        env.define(bound_name(index), value.clone(), false);
    }

    let remaining = (0..arity - bound.len()).map(param_name).collect::<Vec<_>>();
    let arguments = (0..bound.len()).map(bound_name)
                                    .chain(remaining.iter().cloned())
                                    .map(|name| variable(name, line))
                                    .collect();
    let body = Expr::Call { callee: Box::new(variable(TARGET.to_string(), line)),
                            arguments,
                            line };

    Ok(closure(remaining, body, env))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::parser::parse_program;

    fn define(context: &mut Context, source: &str) -> Value {
        let program = parse_program(source).unwrap();
        context.execute(&program[0]).unwrap()
    }

    #[test]
    fn curried_chain_matches_direct_call() {
        let mut context = Context::new();
        let f = define(&mut context, "let f = |a, b, c| a * 100 + b * 10 + c");

        let mut step = curry(&mut context, &[f.clone()], 1).unwrap();
        for digit in [1, 2, 3] {
            step = context.call_value(&step, vec![Value::Integer(digit)], 1).unwrap();
        }

        let direct = context.call_value(&f,
                                        vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
                                        1)
                            .unwrap();
        assert_eq!(step, direct);
        assert_eq!(step, Value::Integer(123));
    }

    #[test]
    fn unary_functions_are_returned_unchanged() {
        let mut context = Context::new();
        let f = define(&mut context, "let f = |x| x");
        assert_eq!(curry(&mut context, &[f.clone()], 1).unwrap(), f);
    }

    #[test]
    fn variadic_builtins_cannot_be_curried() {
        let mut context = Context::new();
        assert!(matches!(curry(&mut context, &[Value::Builtin("partial")], 1),
                         Err(RuntimeError::InvalidArgument { .. })));
        assert!(matches!(curry(&mut context, &[Value::Integer(1)], 1),
                         Err(RuntimeError::TypeMismatch { .. })));
    }

    #[test]
    fn partial_binds_a_prefix() {
        let mut context = Context::new();
        let f = define(&mut context, "let f = |a, b, c| [a, b, c]");
        let g = partial(&mut context, &[f, Value::Integer(1)], 1).unwrap();

        let Value::Closure(closure) = &g else {
            panic!("expected a closure");
        };
        assert_eq!(closure.arity(), 2);
        assert_eq!(g.to_string(), "<closure(_, _)>");

        let result = context.call_value(&g, vec![Value::Integer(2), Value::Integer(3)], 1)
                            .unwrap();
        assert_eq!(result,
                   Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]));
    }

    #[test]
    fn partial_rejects_too_many_arguments() {
        let mut context = Context::new();
        let args = [Value::Builtin("abs"), Value::Integer(1), Value::Integer(2)];
        assert_eq!(partial(&mut context, &args, 7),
                   Err(RuntimeError::ArgumentCountMismatch { name:     "abs".to_string(),
                                                             expected: "1".to_string(),
                                                             found:    2,
                                                             line:     7, }));
    }
}
