use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDef, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, WeakEnvironment},
        evaluator::function::core::lookup_builtin,
        value::{
            closure::{Closure, Function},
            core::Value,
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested closure calls.
pub const MAX_CALL_DEPTH: usize = 200;

/// Number of scopes remembered before dead ones are first pruned.
const SCOPE_PRUNE_THRESHOLD: usize = 256;

/// Non-local exits while evaluating inside a function body.
///
/// `return` unwinds to the innermost closure call; errors unwind to the
/// statement being executed.
#[derive(Debug)]
pub(crate) enum Unwind {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result of internal evaluation steps that may also unwind a `return`.
pub(crate) type Flow<T> = Result<T, Unwind>;

/// Stores the runtime evaluation context.
///
/// The context owns the global scope, the scope currently being evaluated in,
/// the text emitted by `print`, and the call depth.
///
/// ## Usage
///
/// A `Context` is created once and reused for every statement of a program,
/// so bindings made by one statement are visible to the next.
///
/// ```
/// use slate::{
///     interpreter::{evaluator::core::Context, parser::parse_program, value::core::Value},
/// };
///
/// let mut context = Context::new();
/// let program = parse_program("var n = 1\nn += 41\nn").unwrap();
///
/// let values = program.iter()
///                     .map(|statement| context.execute(statement))
///                     .collect::<Result<Vec<_>, _>>()
///                     .unwrap();
///
/// assert_eq!(values, vec![Value::Integer(1), Value::Integer(42), Value::Integer(42)]);
/// ```
pub struct Context {
    /// The scope statements are currently evaluated in.
    pub(crate) env:   Environment,
    globals:          Environment,
    output:           Vec<String>,
    /// Number of closure calls currently active.
    pub(crate) depth: usize,
    max_call_depth:   usize,
    /// Every scope created for a block, loop iteration or call.
    scopes:           Vec<WeakEnvironment>,
    prune_at:         usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // A scope can be kept alive by a value it holds, such as an array of
        // closures that captured it. Clearing every scope still alive breaks
        // those cycles.
        self.globals.clear();
        for scope in self.scopes.drain(..).filter_map(|scope| scope.upgrade()) {
            scope.clear();
        }
    }
}

impl Context {
    /// Creates a new evaluation context with an empty global scope and the
    /// default call depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_call_depth(MAX_CALL_DEPTH)
    }

    /// Creates a new evaluation context allowing at most `max_call_depth`
    /// nested closure calls.
    #[must_use]
    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        let globals = Environment::default();
        Self { env: globals.clone(),
               globals,
               output: Vec::new(),
               depth: 0,
               max_call_depth,
               scopes: Vec::new(),
               prune_at: SCOPE_PRUNE_THRESHOLD }
    }

    /// The configured limit on nested closure calls.
    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// The global scope.
    #[must_use]
    pub const fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Creates a child scope of `parent` and remembers it until the context
    /// is dropped.
    pub(crate) fn new_scope(&mut self, parent: Environment) -> Environment {
        if self.scopes.len() >= self.prune_at {
            self.scopes.retain(WeakEnvironment::is_alive);
            self.prune_at = (self.scopes.len() * 2).max(SCOPE_PRUNE_THRESHOLD);
        }
        let scope = parent.child();
        self.scopes.push(scope.downgrade());
        scope
    }

    /// Appends a line of program output.
    pub fn emit(&mut self, text: String) {
        self.output.push(text);
    }

    /// Returns and clears the output emitted since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Executes one top-level statement and returns its annotation value.
    ///
    /// Declarations and assignments yield the bound value, function
    /// definitions yield unit, and expressions yield their value.
    ///
    /// # Errors
    /// Any runtime error raised by the statement. A `return` outside of a
    /// function body is `ReturnOutsideFunction`.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Value> {
        trace!(line = statement.line_number(), "executing statement");
        let result = self.eval_statement(statement);
        self.finish(result, statement.line_number())
    }

    fn finish(&mut self, result: Flow<Value>, line: usize) -> EvalResult<Value> {
        // An error may leave a nested scope or call depth behind.
        self.env = self.globals.clone();
        self.depth = 0;
        match result {
            Ok(value) => Ok(value),
            Err(Unwind::Error(error)) => Err(error),
            Err(Unwind::Return(_)) => Err(RuntimeError::ReturnOutsideFunction { line }),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant.
    pub(crate) fn eval(&mut self, expr: &Expr) -> Flow<Value> {
        ensure_sufficient_stack(|| self.eval_expr(expr))
    }

    fn eval_expr(&mut self, expr: &Expr) -> Flow<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => Ok(self.eval_variable(name, *line)?),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Ok(Self::eval_unary(*op, &value, *line)?)
            },
            Expr::BinaryOp { left, op, right, line } => {
                self.eval_binary_expr(left, *op, right, *line)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
            Expr::Closure { params, body, .. } => Ok(self.make_closure(None, params, body)),
            Expr::IfExpr { condition,
                           then_branch,
                           else_branch,
                           line, } => {
                if self.eval(condition)?.as_bool(*line)? {
                    self.eval(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch)
                } else {
                    Ok(Value::Unit)
                }
            },
            Expr::ForExpr { context, line } => self.eval_for(context, *line),
            Expr::WhileExpr { condition,
                              body,
                              line, } => self.eval_while(condition, body, *line),
            Expr::Block { statements, .. } => self.eval_block(statements),
            Expr::ArrayLiteral { elements, .. } => self.eval_array_literal(elements),
            Expr::MapLiteral { entries, .. } => self.eval_map_literal(entries),
            Expr::Index { target, index, line } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                Ok(Self::eval_index(&target, &index, *line)?)
            },
        }
    }

    /// Evaluates a single statement.
    ///
    /// Handles declarations, assignments, function definitions, `return` and
    /// plain expression statements.
    pub(crate) fn eval_statement(&mut self, statement: &Statement) -> Flow<Value> {
        match statement {
            Statement::Function(FunctionDef { name, params, body, .. }) => {
                let function = self.make_closure(Some(name.clone()), params, body);
                self.env.define(name.as_str(), function, false);
                Ok(Value::Unit)
            },
            Statement::VariableDeclaration { name,
                                             mutable,
                                             value,
                                             .. } => {
                let value = self.eval(value)?;
                self.env.define(name.as_str(), value.clone(), *mutable);
                Ok(value)
            },
            Statement::Assignment { name, value, line } => {
                let value = self.eval(value)?;
                self.env.assign(name, value.clone(), *line)?;
                Ok(value)
            },
            Statement::CompoundAssignment { name,
                                            op,
                                            value,
                                            line, } => {
                let current = self.eval_variable(name, *line)?;
                let rhs = self.eval(value)?;
                let result = Self::eval_binary(*op, &current, &rhs, *line)?;
                self.env.assign(name, result.clone(), *line)?;
                Ok(result)
            },
            Statement::IndexAssignment { name,
                                         index,
                                         value,
                                         line, } => {
                let index = self.eval(index)?;
                let value = self.eval(value)?;
                let line = *line;
                self.env.update(name, line, |slot| {
                            Self::set_index(slot, &index, value.clone(), line)
                        })?;
                Ok(value)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Unit,
                };
                Err(Unwind::Return(value))
            },
            Statement::Expression { expr, .. } => self.eval(expr),
        }
    }

    /// Runs `f` with `env` as the current scope and restores the previous
    /// scope afterwards, whether `f` succeeds or not.
    pub(crate) fn with_env<T>(&mut self,
                              env: Environment,
                              f: impl FnOnce(&mut Self) -> Flow<T>)
                              -> Flow<T> {
        let saved = std::mem::replace(&mut self.env, env);
        let result = f(self);
        self.env = saved;
        result
    }

    /// Evaluates the statements of a block in a new child scope.
    ///
    /// The value of a block is the value of its last statement, or unit for
    /// an empty block.
    fn eval_block(&mut self, statements: &[Statement]) -> Flow<Value> {
        let scope = self.new_scope(self.env.clone());
        self.with_env(scope, |ctx| {
                let mut last = Value::Unit;
                for statement in statements {
                    last = ctx.eval_statement(statement)?;
                }
                Ok(last)
            })
    }

    /// Resolves a name, first in the scope chain and then in the builtin
    /// table.
    fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.env.get(name) {
            return Ok(value);
        }
        lookup_builtin(name).map(|builtin| Value::Builtin(builtin.name))
                            .ok_or_else(|| RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                                               line })
    }

    /// Creates a closure capturing the current scope by reference.
    fn make_closure(&self, name: Option<String>, params: &[String], body: &Rc<Expr>) -> Value {
        let function = Function { name,
                                  params: params.to_vec(),
                                  body: Rc::clone(body) };
        Value::Closure(Rc::new(Closure { function: Rc::new(function),
                                         env:      self.env.clone(), }))
    }

    /// Evaluates the callee, then the arguments from left to right, and
    /// applies them.
    fn eval_call(&mut self, callee: &Expr, arguments: &[Expr], line: usize) -> Flow<Value> {
        let callee = self.eval(callee)?;
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.eval(argument)?);
        }
        Ok(self.call_value(&callee, args, line)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::parser::parse_program;

    fn run_all(context: &mut Context, source: &str) -> Vec<EvalResult<Value>> {
        parse_program(source).unwrap()
                             .iter()
                             .map(|statement| context.execute(statement))
                             .collect()
    }

    #[test]
    fn function_definitions_annotate_unit() {
        let mut context = Context::new();
        let results = run_all(&mut context, "square(x) = x * x\nsquare(7)");
        assert_eq!(results, vec![Ok(Value::Unit), Ok(Value::Integer(49))]);
    }

    #[test]
    fn top_level_return_is_rejected() {
        let mut context = Context::new();
        let results = run_all(&mut context, "return 1");
        assert_eq!(results,
                   vec![Err(RuntimeError::ReturnOutsideFunction { line: 1 })]);
    }

    #[test]
    fn failed_statement_restores_global_scope() {
        let mut context = Context::new();
        let results = run_all(&mut context, "do {\nlet inner = 1\nundefined_name\n}\nlet outer = 2");
        assert!(results[0].is_err());
        assert_eq!(results[1], Ok(Value::Integer(2)));
        assert_eq!(context.globals().get("inner"), None);
        assert_eq!(context.globals().get("outer"), Some(Value::Integer(2)));
    }

    #[test]
    fn print_output_is_collected() {
        let mut context = Context::new();
        run_all(&mut context, "print(\"a\")\nprint(1 + 1)");
        assert_eq!(context.take_output(), vec!["a".to_string(), "2".to_string()]);
        assert!(context.take_output().is_empty());
    }

    fn captured_scope(value: &Value) -> WeakEnvironment {
        match value {
            Value::Closure(closure) => closure.env.downgrade(),
            other => panic!("expected a closure, found {other}"),
        }
    }

    const MAKE_COUNTER: &str = "makeCounter() = do {
var c = 0
inc() = do {
    c += 1
    return c
}
return inc
}";

    #[test]
    fn function_scope_is_freed_with_its_last_closure() {
        let mut context = Context::new();
        let results = run_all(&mut context, &format!("{MAKE_COUNTER}\nvar k = makeCounter()\nk()\nk()"));
        assert_eq!(results[3], Ok(Value::Integer(2)));
        drop(results);

        let scope = captured_scope(&context.globals().get("k").unwrap());
        assert!(scope.is_alive());

        run_all(&mut context, "k = ()");
        assert!(!scope.is_alive());
    }

    #[test]
    fn let_bound_closure_does_not_keep_its_scope_alive() {
        let mut context = Context::new();
        let source = "mk() = do {\nlet step = |x| x + 1\nreturn step\n}\nvar s = mk()\ns(1)";
        let results = run_all(&mut context, source);
        assert_eq!(results[2], Ok(Value::Integer(2)));
        drop(results);

        let scope = captured_scope(&context.globals().get("s").unwrap());
        run_all(&mut context, "s = ()");
        assert!(!scope.is_alive());
    }

    #[test]
    fn dropping_the_context_breaks_remaining_cycles() {
        let mut context = Context::new();
        // The closure sits in an array stored in the scope it captured.
        let source = "mk() = do {\nvar fs = []\nfs = push(fs, || len(fs))\nreturn fs[0]\n}\nlet g = mk()\ng()";
        let results = run_all(&mut context, source);
        assert_eq!(results[2], Ok(Value::Integer(1)));
        drop(results);

        let scope = captured_scope(&context.globals().get("g").unwrap());
        assert!(scope.is_alive());

        drop(context);
        assert!(!scope.is_alive());
    }

    #[test]
    fn stored_functions_keep_their_identity() {
        let mut context = Context::new();
        let results = run_all(&mut context,
                              "f(x) = x\nlet g = f\nlet h = |x| x\nvar fs = [f]\n[f == g, fs[0] == f, f == h]");
        assert_eq!(results[4],
                   Ok(Value::from(vec![Value::Bool(true), Value::Bool(true), Value::Bool(false)])));
    }
}
