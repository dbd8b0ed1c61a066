use std::thread;

use pretty_assertions::assert_eq;
use slate::{
    Error,
    error::RuntimeError,
    interpreter::{evaluator::core::MAX_CALL_DEPTH, value::core::Value},
    run,
    session::{Annotation, ErrorPolicy, Session, SessionOptions},
};

fn value(src: &str) -> Value {
    run(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn counter_closure_keeps_state() {
    let src = r"
makeCounter() = do {
    var count = 0
    return || do {
        count += 1
        return count
    }
}
let next = makeCounter()
next()
next()
[next(), makeCounter()()]
";
    assert_eq!(value(src), value("[3, 1]"));
}

#[test]
fn mutation_inside_closure_is_visible_outside() {
    let src = r"
var total = 0
let add = |n| do {
    total += n
}
add(5)
add(7)
total
";
    assert_eq!(value(src), Value::Integer(12));
}

#[test]
fn later_external_mutation_is_observed() {
    let src = r"
var factor = 2
let scale = |x| x * factor
let before = scale(10)
factor = 3
[before, scale(10)]
";
    assert_eq!(value(src), value("[20, 30]"));
}

#[test]
fn every_reference_to_a_closure_shares_its_state() {
    let src = r"
var hits = 0
let touch = || do {
    hits += 1
}
let alias = touch
touch()
alias()
let wrapped = [touch, alias]
wrapped[0]()
[hits, touch == alias]
";
    assert_eq!(value(src), value("[3, true]"));
}

#[test]
fn loop_iterations_capture_their_own_variable() {
    let src = r"
var getters = []
for i in 0..3 do {
    getters = push(getters, || i * 10)
}
map(getters, |g| g())
";
    assert_eq!(value(src), value("[0, 10, 20]"));
}

#[test]
fn named_functions_can_recurse_and_call_later_definitions() {
    let src = r"
isEven(n) = if n == 0 do { true } else do { isOdd(n - 1) }
isOdd(n) = if n == 0 do { false } else do { isEven(n - 1) }
[isEven(10), isOdd(7)]
";
    assert_eq!(value(src), value("[true, true]"));
}

#[test]
fn closures_returning_closures() {
    let src = r"
let adder = |a| |b| a + b
let addTen = adder(10)
[addTen(1), adder(1)(2)]
";
    assert_eq!(value(src), value("[11, 3]"));
}

#[test]
fn curry_matches_direct_application() {
    let src = r"
addThreeNumbers(a, b, c) = a + b + c
let curried = curry(addThreeNumbers)
let step = curried(1)
[step(2)(3), curried(1)(2)(3) == addThreeNumbers(1, 2, 3)]
";
    assert_eq!(value(src), value("[6, true]"));
}

#[test]
fn curry_works_on_builtins() {
    assert_eq!(value("curry(repeat)(\"ab\")(2)"), Value::from("abab"));
    assert_eq!(value("let f = |x| x + 1\ncurry(f) == f"), Value::Bool(true));
    assert!(matches!(runtime_error("curry(partial)"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("curry(3)"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn partial_application() {
    let src = r#"
greet(greeting, name) = greeting + ", " + name
let hello = partial(greet, "Hello")
hello("Ada")
"#;
    assert_eq!(value(src), Value::from("Hello, Ada"));

    assert_eq!(value("let clampLow = partial(max, 0)\nmap([-2, 5], clampLow)"),
               value("[0, 5]"));
    assert_eq!(value("let thunk = partial(|a, b| a * b, 6, 7)\nthunk()"),
               Value::Integer(42));
    assert!(matches!(runtime_error("partial(|a| a, 1, 2)"),
                     RuntimeError::ArgumentCountMismatch { found: 2, .. }));
}

#[test]
fn curried_closures_keep_capturing_by_reference() {
    let src = r"
var offset = 1
add3(a, b, c) = a + b + c + offset
let f = curry(add3)(1)
offset = 100
f(2)(3)
";
    assert_eq!(value(src), Value::Integer(106));
}

#[test]
fn filter_requires_boolean_predicates() {
    assert_eq!(value("isEven(n) = n % 2 == 0\nfilter([1, 2, 3, 4], isEven)"),
               value("[2, 4]"));
    assert!(matches!(runtime_error("filter([1, 2], |x| x)"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn errors_inside_closures_carry_the_failing_line() {
    let src = "divide(a, b) = a / b\nlet r = 1\ndivide(r, 0)";
    assert_eq!(runtime_error(src), RuntimeError::DivideByZero { line: 1 });
}

/// Runs `f` on a thread with the platform's default stack size, as an
/// embedding application would.
fn on_default_thread<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    thread::spawn(f).join().unwrap()
}

/// Values are not `Send`, so results leave the worker thread as text.
fn outcomes(annotations: &[Annotation]) -> Vec<Result<String, RuntimeError>> {
    annotations.iter()
               .map(|a| a.outcome.as_ref().map(ToString::to_string).map_err(Clone::clone))
               .collect()
}

const COUNT_DOWN: &str = "count(n) = if n == 0 do { 0 } else do { 1 + count(n - 1) }";

#[test]
fn runaway_recursion_hits_the_call_depth_limit() {
    let results = on_default_thread(|| {
        let mut session = Session::new(SessionOptions::default());
        let source = format!("forever(n) = forever(n + 1)\nforever(0)\n{COUNT_DOWN}\ncount(3)");
        outcomes(&session.run(&source).unwrap())
    });

    // The session halts after the failure.
    assert_eq!(results,
               vec![Ok("()".to_string()),
                    Err(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH,
                                                          line:  1, })]);
}

#[test]
fn recursion_reaches_the_default_limit_exactly() {
    let results = on_default_thread(|| {
        let limit = MAX_CALL_DEPTH;
        let source = format!("{COUNT_DOWN}\ncount({})\ncount({limit})", limit - 1);
        let options = SessionOptions { error_policy: ErrorPolicy::Continue,
                                       ..SessionOptions::default() };
        outcomes(&Session::new(options).run(&source).unwrap())
    });

    assert_eq!(results[1], Ok((MAX_CALL_DEPTH - 1).to_string()));
    assert_eq!(results[2],
               Err(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH,
                                                     line:  1, }));
}

#[test]
fn raised_limits_are_not_bounded_by_the_thread_stack() {
    let result = on_default_thread(|| {
        let options = SessionOptions { max_call_depth: 10_000,
                                       ..SessionOptions::default() };
        let source = format!("{COUNT_DOWN}\ncount(5000)");
        outcomes(&Session::new(options).run(&source).unwrap())
    });
    assert_eq!(result[1], Ok("5000".to_string()));
}

#[test]
fn deeply_nested_expressions_parse_and_evaluate() {
    let result = on_default_thread(|| {
        let depth = 2_000;
        let source = format!("{}1{}", "(".repeat(depth), " + 1)".repeat(depth));
        run(&source).map(|v| v.to_string())
    });
    assert_eq!(result, Ok("2001".to_string()));
}

#[test]
fn call_depth_resets_after_an_error() {
    let results = on_default_thread(|| {
        let options = SessionOptions { error_policy:   ErrorPolicy::Continue,
                                       max_call_depth: 50, };
        let mut session = Session::new(options);
        let source = format!("forever(n) = forever(n + 1)\nforever(0)\n{COUNT_DOWN}\ncount(40)");
        outcomes(&session.run(&source).unwrap())
    });

    assert!(matches!(results[1], Err(RuntimeError::CallDepthExceeded { limit: 50, .. })));
    assert_eq!(results[3], Ok("40".to_string()));
}
