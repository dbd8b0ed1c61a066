//! Property-based tests for the evaluator.
//!
//! Programs are generated as source text from random operands and their
//! results compared with the same computation done natively.

use proptest::prelude::*;
use slate::{Error, error::RuntimeError, interpreter::value::core::Value, run};

/// Integers that can be written as a literal, optionally negated.
fn arb_int() -> impl Strategy<Value = i64> {
    any::<i64>().prop_filter("i64::MIN has no literal form", |n| *n != i64::MIN)
}

/// Operands small enough that products and sums stay exact.
fn arb_small() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000
}

fn eval_int(source: &str) -> Result<i64, Error> {
    match run(source)? {
        Value::Integer(n) => Ok(n),
        other => panic!("expected an integer from {source:?}, got {other}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn division_truncates_toward_zero(a in arb_small(), b in arb_small()) {
        prop_assume!(b != 0);
        prop_assert_eq!(eval_int(&format!("{a} / {b}")).unwrap(), a / b);
    }

    #[test]
    fn remainder_takes_the_sign_of_the_dividend(a in arb_small(), b in arb_small()) {
        prop_assume!(b != 0);
        let quotient = eval_int(&format!("{a} / {b}")).unwrap();
        let remainder = eval_int(&format!("{a} % {b}")).unwrap();

        prop_assert_eq!(quotient * b + remainder, a);
        prop_assert!(remainder == 0 || remainder.signum() == a.signum());
    }

    #[test]
    fn division_by_zero_is_an_error(a in arb_small()) {
        prop_assert!(matches!(run(&format!("{a} / 0")),
                              Err(Error::Runtime(RuntimeError::DivideByZero { line: 1 }))),
                     "expected DivideByZero on line 1");
    }

    #[test]
    fn wrapping_operators_match_twos_complement(a in arb_int(), b in arb_int()) {
        prop_assert_eq!(eval_int(&format!("{a} &+ {b}")).unwrap(), a.wrapping_add(b));
        prop_assert_eq!(eval_int(&format!("{a} &- {b}")).unwrap(), a.wrapping_sub(b));
        prop_assert_eq!(eval_int(&format!("{a} &* {b}")).unwrap(), a.wrapping_mul(b));
    }

    #[test]
    fn checked_operators_never_wrap(a in arb_int(), b in arb_int()) {
        for (op, expected) in [("+", a.checked_add(b)), ("-", a.checked_sub(b)), ("*", a.checked_mul(b))] {
            let result = eval_int(&format!("{a} {op} {b}"));
            match expected {
                Some(n) => prop_assert_eq!(result.unwrap(), n),
                None => prop_assert!(matches!(result,
                                              Err(Error::Runtime(RuntimeError::ArithmeticOverflow { .. }))),
                                     "expected ArithmeticOverflow"),
            }
        }
    }

    #[test]
    fn currying_is_equivalent_to_direct_calls(a in arb_small(), b in arb_small(), c in arb_small()) {
        let source = format!("f(a, b, c) = a * 3 - b + c\n\
                              [f({a}, {b}, {c}) == curry(f)({a})({b})({c}), \
                              partial(f, {a})({b}, {c}) == partial(f, {a}, {b})({c})]");
        prop_assert_eq!(run(&source).unwrap(),
                        Value::from(vec![Value::Bool(true), Value::Bool(true)]));
    }

    #[test]
    fn closures_observe_later_assignments(initial in arb_int(), updated in arb_int()) {
        let source = format!("var x = {initial}\nlet read = || x\nx = {updated}\nread()");
        prop_assert_eq!(eval_int(&source).unwrap(), updated);
    }

    #[test]
    fn array_copies_are_independent(xs in prop::collection::vec(arb_small(), 1..8), index in 0usize..8) {
        let index = index % xs.len();
        let literal = format!("[{}]", xs.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "));
        let source = format!("var a = {literal}\nvar b = a\nb[{index}] = 1234567\na");

        let expected = Value::from(xs.iter().copied().map(Value::Integer).collect::<Vec<_>>());
        prop_assert_eq!(run(&source).unwrap(), expected);
    }

    #[test]
    fn missing_map_keys_read_as_unit(key in "[a-z]{1,6}", other in "[A-Z]{1,6}") {
        let source = format!("let m = {{\"{key}\": 1}}\n[m[\"{other}\"], has_key(m, \"{other}\"), m[\"{key}\"]]");
        prop_assert_eq!(run(&source).unwrap(),
                        Value::from(vec![Value::Unit, Value::Bool(false), Value::Integer(1)]));
    }
}
