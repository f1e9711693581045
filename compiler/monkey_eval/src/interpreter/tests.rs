use super::*;
use crate::print_handler::buffer_handler;
use monkey_parse::parse;
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Program {
    match parse(source).into_result() {
        Ok(program) => program,
        Err(errors) => panic!("parse errors in {source:?}: {errors:?}"),
    }
}

fn run(source: &str) -> Value {
    run_with_output(source).0
}

fn run_with_output(source: &str) -> (Value, String) {
    let out = buffer_handler();
    let mut interp = InterpreterBuilder::new().print_handler(out.clone()).build();
    let value = interp.eval_program(&parse_ok(source), &Environment::new());
    (value, out.get_output())
}

fn error_of(source: &str) -> String {
    let value = run(source);
    match value.as_error() {
        Some(message) => message.to_string(),
        None => panic!("expected error from {source:?}, got {value:?}"),
    }
}

#[test]
fn integer_expressions() {
    let cases = [
        ("5", 5),
        ("-10", -10),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Integer(expected), "source: {source}");
    }
}

#[test]
fn boolean_expressions() {
    let cases = [
        ("true", true),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("true == true", true),
        ("true != false", true),
        ("(1 < 2) == true", true),
        ("(1 > 2) == true", false),
        ("!true", false),
        ("!!5", true),
        ("!0", false),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Boolean(expected), "source: {source}");
    }
}

#[test]
fn if_else_expressions() {
    assert_eq!(run("if (true) { 10 }"), Value::Integer(10));
    assert_eq!(run("if (false) { 10 }"), Value::Null);
    assert_eq!(run("if (1) { 10 }"), Value::Integer(10));
    assert_eq!(run("if (0) { 10 } else { 20 }"), Value::Integer(10));
    assert_eq!(run("if (1 > 2) { 10 } else { 20 }"), Value::Integer(20));
    assert_eq!(run("if (\"\") { 1 } else { 2 }"), Value::Integer(1));
}

#[test]
fn return_statements() {
    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
        ("let f = fn(x) { return x; x + 10; }; f(10);", 10),
        (
            "let f = fn(x) { let result = x + 10; return result; return 10; }; f(10);",
            20,
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Integer(expected), "source: {source}");
    }
}

#[test]
fn return_wrapper_does_not_leak_from_calls() {
    assert_eq!(
        run("let f = fn() { return 1; }; f() + f()"),
        Value::Integer(2)
    );
    assert_eq!(run("let f = fn() { return 1; }; [f()]").inspect(), "[1]");
}

#[test]
fn return_inside_let_is_not_bound() {
    let env = Environment::new();
    let mut interp = InterpreterBuilder::new().print_handler(buffer_handler()).build();

    let first = parse_ok("let x = if (true) { return 5 };");
    assert_eq!(interp.eval_program(&first, &env), Value::Integer(5));
    assert!(!env.contains_local("x"));

    let second = parse_ok("x + 1");
    assert_eq!(
        interp.eval_program(&second, &env).as_error(),
        Some("identifier not found: x")
    );
}

#[test]
fn return_stops_enclosing_expressions() {
    let cases = [
        ("1 + if (true) { return 2 }", 2),
        ("if (true) { return 3 } + 1", 3),
        ("-if (true) { return 4 }", 4),
        ("len([if (true) { return 1 }][0])", 1),
        ("[10, 20][if (true) { return 5 }]", 5),
        ("{\"a\": if (true) { return 6 }}", 6),
        ("{if (true) { return 7 }: 1}", 7),
        ("if (if (true) { return 8 }) { 0 } else { 1 }", 8),
        ("let f = fn() { let y = if (true) { return 9 }; y + 100 }; f()", 9),
        ("let f = fn() { [1, if (true) { return 10 }, 3] }; f()", 10),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Integer(expected), "source: {source}");
    }

    let (value, output) = run_with_output("puts(if (true) { return 11 }); puts(0)");
    assert_eq!(value, Value::Integer(11));
    assert_eq!(output, "");
}

#[test]
fn error_messages() {
    let cases = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("foobar", "identifier not found: foobar"),
        ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
        (
            "{\"name\": \"Monkey\"}[fn(x) { x }];",
            "unusable as hash key: FUNCTION",
        ),
        ("{fn(x) { x }: 1}", "unusable as hash key: FUNCTION"),
        ("1[0]", "index operator not supported: INTEGER"),
        ("[1][\"a\"]", "index operator not supported: ARRAY"),
        ("5()", "not a function: INTEGER"),
        ("10 / 0", "division by zero"),
    ];
    for (source, expected) in cases {
        assert_eq!(error_of(source), expected, "source: {source}");
    }
}

#[test]
fn first_error_short_circuits() {
    let (value, output) = run_with_output("puts(1); foo + puts(2); puts(3)");
    assert_eq!(value.as_error(), Some("identifier not found: foo"));
    assert_eq!(output, "1\n");

    let (value, output) = run_with_output("[puts(1), missing, puts(2)]");
    assert_eq!(value.as_error(), Some("identifier not found: missing"));
    assert_eq!(output, "1\n");

    let (value, output) = run_with_output("puts(1, missing)");
    assert!(value.is_error());
    assert_eq!(output, "");
}

#[test]
fn let_statements() {
    assert_eq!(run("let a = 5; a;"), Value::Integer(5));
    assert_eq!(run("let a = 5 * 5; a;"), Value::Integer(25));
    assert_eq!(run("let a = 5; let b = a; let c = a + b + 5; c;"), Value::Integer(15));
    assert_eq!(run("let x = 5; let x = 6; x"), Value::Integer(6));
    assert_eq!(run("let x = 7"), Value::Integer(7));
}

#[test]
fn function_values() {
    let value = run("fn(x) { x + 2; };");
    let Value::Function(func) = &value else {
        panic!("expected function, got {value:?}");
    };
    assert_eq!(func.parameters(), ["x".to_string()]);
    assert_eq!(func.body().to_string(), "(x + 2)");
}

#[test]
fn function_application() {
    let cases = [
        ("let identity = fn(x) { x; }; identity(5);", 5),
        ("let identity = fn(x) { return x; }; identity(5);", 5),
        ("let double = fn(x) { x * 2; }; double(5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
        ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
        ("fn(x) { x; }(5)", 5),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Integer(expected), "source: {source}");
    }
}

#[test]
fn closures() {
    assert_eq!(
        run("let f = fn(x) { fn(y) { x + y } }; f(2)(3)"),
        Value::Integer(5)
    );
    assert_eq!(
        run("let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(2);"),
        Value::Integer(4)
    );
}

#[test]
fn function_scope_does_not_leak() {
    assert_eq!(
        error_of("let f = fn() { let inner = 1; inner }; f(); inner"),
        "identifier not found: inner"
    );
    assert_eq!(
        run("let x = 1; let f = fn() { let x = 2; x }; f() + x"),
        Value::Integer(3)
    );
}

#[test]
fn recursion() {
    let source = "
        let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } };
        fib(15)";
    assert_eq!(run(source), Value::Integer(610));
}

#[test]
fn arity() {
    assert_eq!(
        error_of("let add = fn(a, b) { a + b }; add(1)"),
        "wrong number of arguments: want=2, got=1"
    );
    assert_eq!(
        run("let one = fn(a) { a }; one(1, 2, 3)"),
        Value::Integer(1)
    );
}

#[test]
fn call_depth_limit() {
    let program = parse_ok("let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(50)");
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_call_depth(10)
        .build();
    assert_eq!(interp.max_call_depth(), 10);
    assert_eq!(
        interp.eval_program(&program, &Environment::new()).as_error(),
        Some("stack overflow: maximum call depth 10 exceeded")
    );

    // Depth is restored after the failure.
    let shallow = parse_ok("let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(5)");
    assert_eq!(
        interp.eval_program(&shallow, &Environment::new()),
        Value::Integer(0)
    );
}

#[test]
fn deep_recursion_within_default_limit() {
    let source = "
        let count = fn(n) { if (n == 0) { 0 } else { 1 + count(n - 1) } };
        count(5000)";
    assert_eq!(run(source), Value::Integer(5000));
}

#[test]
fn strings() {
    assert_eq!(run("\"Hello World!\""), Value::string("Hello World!"));
    assert_eq!(
        run("\"Hello\" + \" \" + \"World!\""),
        Value::string("Hello World!")
    );
    assert_eq!(run("\"a\" == \"a\""), Value::Boolean(true));
    assert_eq!(run("\"a\" != \"b\""), Value::Boolean(true));
}

#[test]
fn builtin_functions() {
    assert_eq!(run("len(\"\")"), Value::Integer(0));
    assert_eq!(run("len(\"hello world\")"), Value::Integer(11));
    assert_eq!(run("len([1, 2, 3])"), Value::Integer(3));
    assert_eq!(
        error_of("len(1)"),
        "argument to `len` not supported, got INTEGER"
    );
    assert_eq!(run("first([1, 2])"), Value::Integer(1));
    assert_eq!(run("last([1, 2])"), Value::Integer(2));
    assert_eq!(run("rest([1, 2, 3])").inspect(), "[2, 3]");
    assert_eq!(run("push([], 1)").inspect(), "[1]");
    assert_eq!(run("len").inspect(), "builtin function");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_eq!(run("let len = fn(x) { 42 }; len([1])"), Value::Integer(42));
}

#[test]
fn puts_writes_to_print_handler() {
    let (value, output) = run_with_output("puts(\"hello\", 1 + 1, [1, true])");
    assert_eq!(value, Value::Null);
    assert_eq!(output, "hello\n2\n[1, true]\n");
}

#[test]
fn array_literals_and_indexing() {
    assert_eq!(run("[1, 2 * 2, 3 + 3]").inspect(), "[1, 4, 6]");
    let cases = [
        ("[1, 2, 3][0]", Value::Integer(1)),
        ("[1, 2, 3][2]", Value::Integer(3)),
        ("let i = 0; [1][i];", Value::Integer(1)),
        ("[1, 2, 3][1 + 1];", Value::Integer(3)),
        ("let myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];", Value::Integer(6)),
        ("[1, 2, 3][3]", Value::Null),
        ("[1, 2, 3][-1]", Value::Null),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), expected, "source: {source}");
    }
}

#[test]
fn hash_literals() {
    let source = r#"
        let two = "two";
        {
            "one": 10 - 9,
            two: 1 + 1,
            "thr" + "ee": 6 / 2,
            4: 4,
            true: 5,
            false: 6
        }"#;
    assert_eq!(
        run(source).inspect(),
        "{4: 4, false: 6, true: 5, one: 1, three: 3, two: 2}"
    );
    assert_eq!(run(r#"{"a": 1, "a": 2}["a"]"#), Value::Integer(2));
}

#[test]
fn hash_indexing() {
    let cases = [
        (r#"{"foo": 5}["foo"]"#, Value::Integer(5)),
        (r#"{"foo": 5}["bar"]"#, Value::Null),
        (r#"let key = "foo"; {"foo": 5}[key]"#, Value::Integer(5)),
        (r#"{}["foo"]"#, Value::Null),
        ("{5: 5}[5]", Value::Integer(5)),
        ("{true: 5}[true]", Value::Integer(5)),
        ("{false: 5}[false]", Value::Integer(5)),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), expected, "source: {source}");
    }
}

#[test]
fn identity_equality_for_composites() {
    assert_eq!(run("[1] == [1]"), Value::Boolean(false));
    assert_eq!(run("let a = [1]; a == a"), Value::Boolean(true));
    assert_eq!(run("let f = fn() { 1 }; f == f"), Value::Boolean(true));
    assert_eq!(run("fn() { 1 } == fn() { 1 }"), Value::Boolean(false));
    assert_eq!(run("len == len"), Value::Boolean(true));
    assert_eq!(error_of("[1] == {}"), "type mismatch: ARRAY == HASH");
}

#[test]
fn eval_intrinsic() {
    assert_eq!(run("eval(\"1 + 2\")"), Value::Integer(3));
    assert_eq!(run("let x = 10; eval(\"x * 2\")"), Value::Integer(20));
    assert_eq!(
        run("eval(\"let hidden = 1; hidden\"); hidden").as_error(),
        Some("identifier not found: hidden")
    );
    assert_eq!(
        error_of("eval(1)"),
        "argument of eval must be STRING. got=INTEGER"
    );
    assert_eq!(
        error_of("eval(\"let = 1\")"),
        "parse error at eval: expected next token to be IDENT, got = instead; \
         no prefix parse function for = found"
    );
    assert_eq!(
        error_of("eval(\"1\", \"2\")"),
        "wrong number of arguments. got=2, want=1"
    );
}

#[test]
fn launch_and_await() {
    assert_eq!(
        run("let h = launch(fn() { 1 + 1 }); await(h)"),
        Value::Integer(2)
    );
    assert_eq!(run("launch(fn() { 1 })").inspect(), "thread#0");
    assert_eq!(
        run("let x = 20; await(launch(fn() { x + 1 }))"),
        Value::Integer(21)
    );
    assert_eq!(
        run("await(launch(fn() { if (true) { return 5; } 6 }))"),
        Value::Integer(5)
    );
}

#[test]
fn launch_and_await_errors() {
    assert_eq!(
        error_of("launch(1)"),
        "argument for launch must be FUNCTION. got=INTEGER"
    );
    assert_eq!(
        error_of("await(1)"),
        "argument for await must be THREAD_HANDLE. got=INTEGER"
    );
    assert_eq!(
        error_of("launch()"),
        "wrong number of arguments. got=0, want=1"
    );
    assert_eq!(
        error_of("await(launch(fn() { missing }))"),
        "identifier not found: missing"
    );
}

#[test]
fn await_unknown_handle() {
    let elsewhere = ThreadRegistry::new();
    let (foreign, _) = elsewhere.register();
    let env = Environment::new();
    env.set("h", Value::ThreadHandle(foreign));

    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .build();
    assert_eq!(
        interp.eval_program(&parse_ok("await(h)"), &env).as_error(),
        Some("thread not found: 0")
    );
}

#[test]
fn task_writes_stay_in_its_own_frame() {
    let source = "
        let x = 1;
        await(launch(fn() { let x = 99; x }));
        x";
    assert_eq!(run(source), Value::Integer(1));
}

#[test]
fn tasks_share_registry_and_output() {
    let registry = ThreadRegistry::new();
    let out = buffer_handler();
    let mut interp = InterpreterBuilder::new()
        .registry(registry.clone())
        .print_handler(out.clone())
        .build();
    let source = "
        let inner = fn() { puts(\"inner\"); 7 };
        let outer = launch(fn() { await(launch(inner)) * 6 });
        await(outer)";
    assert_eq!(
        interp.eval_program(&parse_ok(source), &Environment::new()),
        Value::Integer(42)
    );
    assert_eq!(registry.len(), 2);
    assert_eq!(out.get_output(), "inner\n");
}

#[test]
fn reserved_names_cannot_be_shadowed() {
    assert_eq!(
        run("let eval = fn(x) { 0 }; eval(\"5\")"),
        Value::Integer(5)
    );
    assert_eq!(run("let launch = 1; launch").inspect(), "builtin function");
    assert_eq!(
        run("let f = fn(await) { await }; f(3)").inspect(),
        "builtin function"
    );
}

#[test]
fn quote_is_intercepted_by_name() {
    assert_eq!(run("quote(1 + x)").inspect(), "QUOTE((1 + x))");
    assert_eq!(error_of("quote"), "identifier not found: quote");
}

#[test]
fn empty_program_is_null() {
    assert_eq!(run(""), Value::Null);
}

#[test]
fn evaluate_entry_point() {
    let registry = ThreadRegistry::new();
    let env = Environment::new();
    let program = parse_ok("let h = launch(fn() { 40 + 2 }); await(h)");
    assert_eq!(crate::evaluate(&program, &env, &registry), Value::Integer(42));
    assert_eq!(registry.len(), 1);
    assert!(env.get("h").is_some());
}
