use std::rc::Rc;

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Unwind},
            function::{builtin, collection, curry, higher_order, min_max, print},
        },
        value::{closure::Closure, core::Value},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluation context, a slice of evaluated argument
/// values and the line number of the call.
pub(crate) type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) struct BuiltinDef {
            pub(crate) name:  &'static str,
            pub(crate) arity: Arity,
            func:             BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"    => { arity: Arity::Exact(1), func: print::print },
    "assert"   => { arity: Arity::Exact(1), func: builtin::assert_fn },
    "len"      => { arity: Arity::Exact(1), func: builtin::len },
    "str"      => { arity: Arity::Exact(1), func: builtin::str_fn },
    "int"      => { arity: Arity::Exact(1), func: builtin::int },
    "float"    => { arity: Arity::Exact(1), func: builtin::float },
    "abs"      => { arity: Arity::Exact(1), func: builtin::abs },
    "min"      => { arity: Arity::Exact(2), func: |_, args, line| min_max::min_max("min", args, line) },
    "max"      => { arity: Arity::Exact(2), func: |_, args, line| min_max::min_max("max", args, line) },
    "repeat"   => { arity: Arity::Exact(2), func: builtin::repeat },
    "push"     => { arity: Arity::Exact(2), func: collection::push },
    "keys"     => { arity: Arity::Exact(1), func: collection::keys },
    "values"   => { arity: Arity::Exact(1), func: collection::values },
    "has_key"  => { arity: Arity::Exact(2), func: collection::has_key },
    "get"      => { arity: Arity::Exact(3), func: collection::get },
    "contains" => { arity: Arity::Exact(2), func: collection::contains },
    "sorted"   => { arity: Arity::Exact(1), func: collection::sorted },
    "map"      => { arity: Arity::Exact(2), func: higher_order::map },
    "filter"   => { arity: Arity::Exact(2), func: higher_order::filter },
    "reduce"   => { arity: Arity::Exact(3), func: higher_order::reduce },
    "curry"    => { arity: Arity::Exact(1), func: curry::curry },
    "partial"  => { arity: Arity::AtLeast(1), func: curry::partial },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }

    /// Human readable form used in `ArgumentCountMismatch` messages.
    fn describe(self) -> String {
        match self {
            Self::Exact(m) => m.to_string(),
            Self::AtLeast(m) => format!("at least {m}"),
        }
    }
}

/// Finds a builtin by name.
pub(crate) fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|b| b.name == name)
}

/// Views `args` as an array of exactly `N` values.
///
/// Builtins are arity-checked before they run; this turns the slice into a
/// pattern-friendly array and reports a mismatch instead of panicking.
pub(crate) fn expect_args<'v, const N: usize>(name: &str,
                                              args: &'v [Value],
                                              line: usize)
                                              -> EvalResult<&'v [Value; N]> {
    <&[Value; N]>::try_from(args).map_err(|_| RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                                  expected: N.to_string(),
                                                                                  found: args.len(),
                                                                                  line })
}

/// Returns the fixed number of parameters a callable accepts.
///
/// # Errors
/// `TypeMismatch` for values that are not callable, `InvalidArgument` for
/// builtins with a variable number of arguments.
pub(crate) fn fixed_arity(callee: &Value, line: usize) -> EvalResult<usize> {
    match callee {
        Value::Closure(closure) => Ok(closure.arity()),
        Value::Builtin(name) => match lookup_builtin(name).map(|b| b.arity) {
            Some(Arity::Exact(n)) => Ok(n),
            _ => Err(RuntimeError::InvalidArgument { details: format!("'{name}' does not have a fixed number of parameters"),
                                                     line }),
        },
        other => Err(RuntimeError::type_mismatch(format!("{} is not callable", other.type_name()),
                                                 line)),
    }
}

impl Context {
    /// Calls a closure or builtin with already evaluated arguments.
    ///
    /// This is the single entry point for every call: call expressions,
    /// higher-order builtins such as `map`, and the closures produced by
    /// `curry` and `partial` all go through it.
    ///
    /// # Errors
    /// - `TypeMismatch` if `callee` is not callable.
    /// - `ArgumentCountMismatch` if the number of arguments is wrong.
    /// - `CallDepthExceeded` if too many closure calls are nested.
    /// - Any error raised by the callee.
    ///
    /// # Example
    /// ```
    /// use slate::interpreter::{evaluator::core::Context, parser::parse_program, value::core::Value};
    ///
    /// let mut context = Context::new();
    /// let program = parse_program("let add = |a, b| a + b").unwrap();
    /// let add = context.execute(&program[0]).unwrap();
    ///
    /// let sum = context.call_value(&add, vec![Value::Integer(2), Value::Integer(3)], 1);
    /// assert_eq!(sum.unwrap(), Value::Integer(5));
    ///
    /// let len = context.call_value(&Value::Builtin("len"), vec![Value::from("abc")], 1);
    /// assert_eq!(len.unwrap(), Value::Integer(3));
    /// ```
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        match callee {
            Value::Closure(closure) => self.call_closure(closure, args, line),
            Value::Builtin(name) => {
                let builtin = lookup_builtin(name).ok_or_else(|| {
                                                      RuntimeError::UndefinedIdentifier { name: (*name).to_string(),
                                                                                          line }
                                                  })?;
                if !builtin.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     builtin.name.to_string(),
                                                                     expected: builtin.arity.describe(),
                                                                     found:    args.len(),
                                                                     line, });
                }
                (builtin.func)(self, &args, line)
            },
            other => Err(RuntimeError::type_mismatch(format!("{} is not callable",
                                                             other.type_name()),
                                                     line)),
        }
    }

    /// Executes a closure.
    ///
    /// The parameters are bound immutably in a new scope whose parent is the
    /// closure's captured environment. A body that is a single expression
    /// yields its value; a body with several statements yields the value of
    /// an explicit `return`, or unit.
    fn call_closure(&mut self,
                    closure: &Rc<Closure>,
                    args: Vec<Value>,
                    line: usize)
                    -> EvalResult<Value> {
        if args.len() != closure.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     closure.display_name()
                                                                             .to_string(),
                                                             expected: closure.arity().to_string(),
                                                             found:    args.len(),
                                                             line, });
        }
        if self.depth >= self.max_call_depth() {
            return Err(RuntimeError::CallDepthExceeded { limit: self.max_call_depth(),
                                                         line });
        }

        debug!(name = closure.display_name(), depth = self.depth, line, "calling closure");

        let scope = self.new_scope(closure.env.clone());
        for (param, arg) in closure.function.params.iter().zip(args) {
            scope.define(param.as_str(), arg, false);
        }

        self.depth += 1;
        let result = self.with_env(scope, |ctx| ctx.eval(&closure.function.body));
        self.depth -= 1;

        match result {
            Ok(value) if closure.function.body.is_single_expression() => Ok(value),
            Ok(_) => Ok(Value::Unit),
            Err(Unwind::Return(value)) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
        }
    }
}
