use std::fmt;

use tracing::{debug, warn};

use crate::{
    ast::Statement,
    error::{ParseError, RuntimeError},
    interpreter::{
        environment::Binding,
        evaluator::core::{Context, MAX_CALL_DEPTH},
        parser::parse_program,
        value::core::Value,
    },
};

/// What a session does after a statement fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing statement.
    #[default]
    Halt,
    /// Record the failure and run the remaining statements.
    Continue,
}

/// Settings for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Behaviour after a failing statement.
    pub error_policy:   ErrorPolicy,
    /// Limit on nested closure calls.
    pub max_call_depth: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { error_policy:   ErrorPolicy::default(),
               max_call_depth: MAX_CALL_DEPTH, }
    }
}

/// The recorded result of one top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// The line the statement starts on.
    pub line:    usize,
    /// The statement's value, or the error it failed with.
    pub outcome: Result<Value, RuntimeError>,
    /// Text printed while the statement ran, in emission order.
    pub output:  Vec<String>,
}

impl Annotation {
    /// Returns `true` if the statement failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(value) => write!(f, "line {}: {}", self.line, value.repr()),
            Err(error) => write!(f, "{error}"),
        }
    }
}

/// Runs programs statement by statement and annotates each one with its
/// result, the way a playground shows a value next to every line.
///
/// Bindings persist across calls to [`Session::run`], so a session can back
/// an interactive prompt.
///
/// # Example
/// ```
/// use slate::{
///     interpreter::value::core::Value,
///     session::{Session, SessionOptions},
/// };
///
/// let mut session = Session::new(SessionOptions::default());
/// let annotations = session.run("let x = 20\nprint(x)\nx * 2 + 2").unwrap();
///
/// assert_eq!(annotations.len(), 3);
/// assert_eq!(annotations[1].output, vec!["20".to_string()]);
/// assert_eq!(annotations[2].outcome, Ok(Value::Integer(42)));
/// assert_eq!(annotations[2].to_string(), "line 3: 42");
/// ```
#[derive(Default)]
pub struct Session {
    context: Context,
    options: SessionOptions,
}

impl Session {
    /// Creates a session with an empty global scope.
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self { context: Context::with_max_call_depth(options.max_call_depth),
               options }
    }

    /// The options the session was created with.
    #[must_use]
    pub const fn options(&self) -> SessionOptions {
        self.options
    }

    /// Parses `source` and executes its statements.
    ///
    /// Nothing runs if the source does not parse.
    ///
    /// # Errors
    /// The first syntax error in `source`.
    pub fn run(&mut self, source: &str) -> Result<Vec<Annotation>, ParseError> {
        let program = parse_program(source)?;
        debug!(statements = program.len(), "parsed program");
        Ok(self.execute(&program))
    }

    /// Executes already parsed statements and annotates each one.
    ///
    /// Under [`ErrorPolicy::Halt`] the last annotation is the failing one and
    /// the statements after it are not run.
    pub fn execute(&mut self, statements: &[Statement]) -> Vec<Annotation> {
        let mut annotations = Vec::with_capacity(statements.len());

        for statement in statements {
            let outcome = self.context.execute(statement);
            let output = self.context.take_output();
            let annotation = Annotation { line: statement.line_number(),
                                          outcome,
                                          output };

            let failed = annotation.is_error();
            if let Err(error) = &annotation.outcome {
                warn!(line = annotation.line, %error, "statement failed");
            }
            annotations.push(annotation);

            if failed && self.options.error_policy == ErrorPolicy::Halt {
                break;
            }
        }

        annotations
    }

    /// The global bindings, ordered by name.
    #[must_use]
    pub fn bindings(&self) -> Vec<(String, Binding)> {
        self.context.globals().bindings()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn outcomes(annotations: &[Annotation]) -> Vec<Result<Value, RuntimeError>> {
        annotations.iter().map(|a| a.outcome.clone()).collect()
    }

    #[test]
    fn every_statement_is_annotated() {
        let mut session = Session::default();
        let annotations = session.run("var n = 1\nn += 2\nsquare(x) = x * x\nsquare(n)")
                                 .unwrap();

        assert_eq!(outcomes(&annotations),
                   vec![Ok(Value::Integer(1)),
                        Ok(Value::Integer(3)),
                        Ok(Value::Unit),
                        Ok(Value::Integer(9))]);
        assert_eq!(annotations.iter().map(|a| a.line).collect::<Vec<_>>(),
                   vec![1, 2, 3, 4]);
    }

    #[test]
    fn halt_stops_at_first_failure() {
        let mut session = Session::default();
        let annotations = session.run("let a = 1\nlet b = 1 / 0\nlet c = 3").unwrap();

        assert_eq!(outcomes(&annotations),
                   vec![Ok(Value::Integer(1)), Err(RuntimeError::DivideByZero { line: 2 })]);
        assert!(session.bindings().iter().all(|(name, _)| name != "c"));
    }

    #[test]
    fn continue_runs_remaining_statements() {
        let options = SessionOptions { error_policy: ErrorPolicy::Continue,
                                       ..SessionOptions::default() };
        let mut session = Session::new(options);
        let annotations = session.run("let a = 1\nlet b = missing\nlet c = a + 2").unwrap();

        assert_eq!(annotations.len(), 3);
        assert!(annotations[1].is_error());
        assert_eq!(annotations[2].outcome, Ok(Value::Integer(3)));

        let names = session.bindings()
                           .into_iter()
                           .map(|(name, _)| name)
                           .collect::<Vec<_>>();
        assert_eq!(names, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn output_is_attached_to_its_statement() {
        let mut session = Session::default();
        let annotations = session.run("let x = 2\nfor i in 0..x do {\nprint(i)\n}\nprint(\"done\")")
                                 .unwrap();

        assert!(annotations[0].output.is_empty());
        assert_eq!(annotations[1].output, vec!["0".to_string(), "1".to_string()]);
        assert_eq!(annotations[2].output, vec!["done".to_string()]);
    }

    #[test]
    fn parse_errors_run_nothing() {
        let mut session = Session::default();
        assert!(session.run("let x = 1\nlet = 2").is_err());
        assert!(session.bindings().is_empty());
    }

    #[test]
    fn bindings_persist_across_runs() {
        let mut session = Session::default();
        session.run("var total = 10").unwrap();
        let annotations = session.run("total *= 3").unwrap();

        assert_eq!(annotations[0].outcome, Ok(Value::Integer(30)));
        assert_eq!(session.bindings()[0].1,
                   Binding { value:   Value::Integer(30),
                             mutable: true, });
    }

    #[test]
    fn call_depth_comes_from_options() {
        let options = SessionOptions { max_call_depth: 5,
                                       ..SessionOptions::default() };
        let mut session = Session::new(options);
        let annotations = session.run("down(n) = if n == 0 do { 0 } else do { down(n - 1) }\ndown(3)\ndown(10)")
                                 .unwrap();

        assert_eq!(annotations[1].outcome, Ok(Value::Integer(0)));
        assert!(matches!(annotations[2].outcome,
                         Err(RuntimeError::CallDepthExceeded { limit: 5, .. })));
    }
}
