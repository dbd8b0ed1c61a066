use pretty_assertions::assert_eq;
use slate::{
    Error,
    error::{ParseError, RuntimeError},
    interpreter::value::core::Value,
    run,
};

fn assert_success(src: &str) {
    if let Err(e) = run(src) {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) {
    if run(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match run(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

fn value(src: &str) -> Value {
    run(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("let x = 1 + 2\nassert(x == 3)");
    assert_success("let x = 7 * 9\nassert(x == 63)");
    assert_success("let x = 8 - 5\nassert(x == 3)");
    assert_success("let x = 10 / 2\nassert(x == 5)");
    assert_success("assert(2 ^ 10 == 1024)");
    assert_success("assert(2 ^ 3 ^ 2 == 512)");
}

#[test]
fn compound_assignments() {
    assert_success("var x = 2\nx += 3\nassert(x == 5)");
    assert_success("var x = 7\nx -= 2\nassert(x == 5)");
    assert_success("var x = 4\nx *= 2\nassert(x == 8)");
    assert_success("var x = 9\nx /= 3\nassert(x == 3)");
    assert_success("var x = 9\nx %= 4\nassert(x == 1)");
    assert_success("var s = \"ab\"\ns += \"cd\"\nassert(s == \"abcd\")");
}

#[test]
fn let_bindings_are_immutable() {
    assert_eq!(runtime_error("let x = 1\nx = 2"),
               RuntimeError::AssignmentToImmutable { name: "x".to_string(),
                                                     line: 2, });
    assert_failure("let x = 1\nx += 1");
    assert_failure("f(a) = do {\na = 2\n}\nf(1)");
    assert_failure("for i in 0..3 do {\ni = 5\n}");
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_eq!(value("-7 / 2"), Value::Integer(-3));
    assert_eq!(value("-7 % 2"), Value::Integer(-1));
    assert_eq!(value("7 % -2"), Value::Integer(1));
    assert_eq!(value("7.0 / 2"), Value::Float(3.5));
}

#[test]
fn checked_arithmetic_reports_overflow() {
    assert_eq!(runtime_error("let big = 9223372036854775807\nbig + 1"),
               RuntimeError::ArithmeticOverflow { line: 2 });
    assert!(matches!(runtime_error("2 ^ 64"), RuntimeError::ArithmeticOverflow { .. }));
    assert!(matches!(runtime_error("let m = -9223372036854775807 - 1\n-m"),
                     RuntimeError::ArithmeticOverflow { .. }));
    assert!(matches!(runtime_error("1 / 0"), RuntimeError::DivideByZero { .. }));
    assert!(matches!(runtime_error("1 % 0"), RuntimeError::DivideByZero { .. }));
    assert!(matches!(runtime_error("1.5 / 0"), RuntimeError::DivideByZero { .. }));
}

#[test]
fn wrapping_operators_wrap() {
    assert_eq!(value("9223372036854775807 &+ 1"), Value::Integer(i64::MIN));
    assert_eq!(value("let m = -9223372036854775807 - 1\nm &- 1"),
               Value::Integer(i64::MAX));
    assert_eq!(value("4611686018427387904 &* 2"), Value::Integer(i64::MIN));
    assert_failure("1.0 &+ 1");
}

#[test]
fn mixed_numbers_promote() {
    assert_eq!(value("1 + 0.5"), Value::Float(1.5));
    assert_eq!(value("2 ^ -1"), Value::Float(0.5));
    assert_success("assert(1 == 1.0)");
    assert_success("assert(2 > 1.5)");
    assert!(matches!(runtime_error("9007199254740993 + 0.5"),
                     RuntimeError::ArithmeticOverflow { .. }));
}

#[test]
fn type_mismatches_are_errors() {
    assert!(matches!(runtime_error("1 + \"a\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("if 1 do { 2 }"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("!0"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("true and 1"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("\"a\" < 1"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn logical_and_comparisons() {
    assert_success("assert(2 < 3)");
    assert_success("assert(3 > 2)");
    assert_success("assert(2 <= 2)");
    assert_success("assert(3 >= 3)");
    assert_success("assert(2 != 3)");
    assert_success("assert(!false)");
    assert_success("assert(true xor false)");
    assert_success("assert(\"apple\" < \"banana\")");
    assert_success("assert('a' < 'b')");
    assert_success("assert([1, 2] == [1, 2.0])");
    assert_success("assert(1 != \"1\")");
}

#[test]
fn logical_operators_short_circuit() {
    assert_success("assert(false and undefined_name)\n");
    assert_failure("assert(true and undefined_name)");
    assert_success("assert(true or 1 / 0 == 1)");
}

#[test]
fn if_else_chains() {
    let src = "classify(n) = if n < 0 do { \"negative\" } else if n == 0 do { \"zero\" } else do { \"positive\" }\n[classify(-4), classify(0), classify(9)]";
    assert_eq!(value(src).to_string(), r#"["negative", "zero", "positive"]"#);
    assert_eq!(value("if false do { 1 }"), Value::Unit);
}

#[test]
fn loops() {
    assert_eq!(value("var total = 0\nfor i in 1..=10 do {\ntotal += i\n}\ntotal"),
               Value::Integer(55));
    assert_eq!(value("var total = 0\nfor i in 1..10 do {\ntotal += i\n}\ntotal"),
               Value::Integer(45));
    assert_eq!(value("var count = 0\nfor i in 5..1 do {\ncount += 1\n}\ncount"),
               Value::Integer(0));
    assert_eq!(value("var n = 1\nwhile n < 100 do {\nn *= 3\n}\nn"),
               Value::Integer(243));
    assert_eq!(value("var s = \"\"\nfor c in \"abc\" do {\ns = str(c) + s\n}\ns"),
               Value::from("cba"));
    assert_eq!(value("var ks = []\nfor k in {\"b\": 1, \"a\": 2} do {\nks = push(ks, k)\n}\nks"),
               value("[\"a\", \"b\"]"));
}

#[test]
fn blocks_introduce_scopes() {
    assert_failure("do {\nlet inner = 1\n}\ninner");
    assert_eq!(value("let x = 1\nlet y = do {\nlet x = 10\nx + 1\n}\n[x, y]"),
               value("[1, 11]"));
    assert_eq!(value("do { }"), Value::Unit);
}

#[test]
fn arrays_have_value_semantics() {
    assert_eq!(value("var a = [1, 2, 3]\nvar b = a\nb[0] = 9\n[a, b]").to_string(),
               "[[1, 2, 3], [9, 2, 3]]");
    assert_eq!(value("let a = [1, 2]\nlet b = a + [3]\n[len(a), len(b)]"),
               value("[2, 3]"));
    assert_failure("let a = [1, 2]\na[0] = 5");
}

#[test]
fn indexing() {
    assert_eq!(value("[10, 20, 30][1]"), Value::Integer(20));
    assert_eq!(value("\"héllo\"[1]"), Value::Character('é'));
    assert_eq!(runtime_error("let xs = [1, 2]\nxs[2]"),
               RuntimeError::IndexOutOfBounds { len:   2,
                                                found: 2,
                                                line:  2, });
    assert!(matches!(runtime_error("[1][-1]"), RuntimeError::IndexOutOfBounds { .. }));
    assert!(matches!(runtime_error("var s = \"abc\"\ns[0] = 'x'"),
                     RuntimeError::TypeMismatch { .. }));
}

#[test]
fn maps() {
    let src = "var ages = {\"ann\": 31, \"bob\": 27}\nages[\"cid\"] = 40\nages";
    assert_eq!(value(src).to_string(), r#"{"ann": 31, "bob": 27, "cid": 40}"#);

    assert_eq!(value("let m = {\"a\": 1}\nm[\"missing\"]"), Value::Unit);
    assert_eq!(value("let m = {\"a\": 1}\nget(m, \"b\", 0)"), Value::Integer(0));
    assert_eq!(value("let m = {1: \"one\"}\nhas_key(m, 1)"), Value::Bool(true));
    assert_eq!(value("keys({\"b\": 2, \"a\": 1})").to_string(), r#"["a", "b"]"#);
    assert_eq!(value("values({\"b\": 2, \"a\": 1})"), value("[1, 2]"));
    assert_eq!(value("{}").to_string(), "{}");
    assert!(matches!(runtime_error("{[1]: 2}"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn strings_and_characters() {
    assert_eq!(value("\"tab\\there\""), Value::from("tab\there"));
    assert_eq!(value("len(\"héllo\")"), Value::Integer(5));
    assert_eq!(value("repeat(\"ab\", 3)"), Value::from("ababab"));
    assert_eq!(value("contains(\"haystack\", \"st\")"), Value::Bool(true));
    assert_eq!(value("int('A')"), Value::Integer(65));
    assert_eq!(value("str(1.0) + str([1, 'x'])"), Value::from("1.0[1, 'x']"));
    assert_failure("repeat(\"ab\", -1)");
}

#[test]
fn oversized_strings_and_arrays_are_errors() {
    assert!(matches!(runtime_error("repeat(\"ab\", 4611686018427387904)"),
                     RuntimeError::InvalidArgument { line: 1, .. }));
    assert_eq!(runtime_error("repeat(\"abc\", 9223372036854775807)"),
               RuntimeError::ArithmeticOverflow { line: 1 });

    let doubling = "var s = \"ab\"\nwhile true do {\n    s = s + s\n}";
    assert!(matches!(runtime_error(doubling), RuntimeError::InvalidArgument { line: 3, .. }));

    assert!(matches!(runtime_error("int(\"12abc\")"), RuntimeError::InvalidArgument { .. }));
    assert!(matches!(runtime_error("float(\"inf\")"), RuntimeError::InvalidArgument { .. }));
    assert_eq!(runtime_error("float(9007199254740993)"),
               RuntimeError::ArithmeticOverflow { line: 1 });
}

#[test]
fn builtin_functions() {
    assert_eq!(value("abs(-5)"), Value::Integer(5));
    assert_eq!(value("min(3, 1.5)"), Value::Float(1.5));
    assert_eq!(value("max(3, 1.5)"), Value::Integer(3));
    assert_eq!(value("int(-2.9)"), Value::Integer(-2));
    assert_eq!(value("float(2)"), Value::Float(2.0));
    assert_eq!(value("sorted([3, 1, 2])"), value("[1, 2, 3]"));
    assert_eq!(value("contains([1, 2, 3], 2.0)"), Value::Bool(true));
    assert_eq!(value("reduce([1, 2, 3, 4], 0, |acc, x| acc + x)"), Value::Integer(10));
    assert_eq!(value("map([1, 2, 3], |x| x * x)"), value("[1, 4, 9]"));
    assert!(matches!(runtime_error("sorted([1, \"a\"])"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("assert(1 == 2)"), RuntimeError::AssertionFailed { .. }));
}

#[test]
fn builtins_are_first_class() {
    assert_eq!(value("map([\"a\", \"bcd\"], len)"), value("[1, 3]"));
    assert_eq!(value("let f = abs\nf(-2)"), Value::Integer(2));
    assert_eq!(value("abs").to_string(), "<builtin abs>");
}

#[test]
fn argument_counts_are_checked() {
    assert_eq!(runtime_error("add(a, b) = a + b\nadd(1)"),
               RuntimeError::ArgumentCountMismatch { name:     "add".to_string(),
                                                     expected: "2".to_string(),
                                                     found:    1,
                                                     line:     2, });
    assert!(matches!(runtime_error("len(1, 2)"), RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(runtime_error("partial()"), RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(runtime_error("let x = 1\nx(2)"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn scenario_functions() {
    let src = "addThreeNumbers(a, b, c) = a + b + c\naddThreeNumbers(1, 2, 3)";
    assert_eq!(value(src), Value::Integer(6));

    let src = "createStringRepeater(count) = |text| repeat(text, count)\ncreateStringRepeater(2)(\"ab\")";
    assert_eq!(value(src), Value::from("abab"));

    let src = "isEven(n) = n % 2 == 0\nfilter([1, 2, 3, 4], isEven)";
    assert_eq!(value(src), value("[2, 4]"));
}

#[test]
fn returns_from_multi_statement_bodies() {
    let src = "firstNegative(xs) = do {\nfor x in xs do {\nif x < 0 do {\nreturn x\n}\n}\nreturn 0\n}\n[firstNegative([3, -2, -5]), firstNegative([1])]";
    assert_eq!(value(src), value("[-2, 0]"));

    // Without a return, a multi-statement body yields unit.
    assert_eq!(value("f() = do {\nlet x = 1\nx + 1\n}\nf()"), Value::Unit);
    assert_eq!(value("g() = do {\nreturn\n}\ng()"), Value::Unit);
    assert_eq!(value("h() = do { 5 }\nh()"), Value::Integer(5));
    assert!(matches!(runtime_error("return 3"), RuntimeError::ReturnOutsideFunction { .. }));
}

#[test]
fn recursion() {
    let src = "fib(n) = if n < 2 do { n } else do { fib(n - 1) + fib(n - 2) }\nfib(15)";
    assert_eq!(value(src), Value::Integer(610));
}

#[test]
fn statement_annotations_in_display_form() {
    assert_eq!(value("[1.0, 2.5, -3.0]").to_string(), "[1.0, 2.5, -3.0]");
    assert_eq!(value("()").to_string(), "()");
    assert_eq!(value("|a, b| a").to_string(), "<closure(a, b)>");
    assert_eq!(value("pair(a, b) = [a, b]\npair").to_string(), "<fn pair(a, b)>");
}

#[test]
fn parse_errors() {
    assert!(matches!(run("let = 1"), Err(Error::Parse(_))));
    assert!(matches!(run("let x = (1 + 2"), Err(Error::Parse(_))));
    assert!(matches!(run("let print = 1"),
                     Err(Error::Parse(ParseError::IdentifierReserved { .. }))));
    assert!(matches!(run("for len in [1] do { 1 }"),
                     Err(Error::Parse(ParseError::IdentifierReserved { .. }))));
    assert!(matches!(run("do {\n1"), Err(Error::Parse(_))));
    // Nothing runs when any statement fails to parse.
    assert!(matches!(run("assert(false)\nlet = 2"), Err(Error::Parse(_))));
}

#[test]
fn comments_are_ignored() {
    assert_eq!(value("// leading\nlet x = 1 // trailing\n/* block\ncomment */\nx + 1"),
               Value::Integer(2));
}
