//! Whole-program evaluation through the public API.

use monkey_eval::{
    buffer_handler, define_macros, evaluate, expand_macros, Environment, InterpreterBuilder,
    ThreadRegistry, Value,
};
use monkey_ir::Program;
use monkey_parse::parse;
use pretty_assertions::assert_eq;

fn parse_ok(source: &str) -> Program {
    match parse(source).into_result() {
        Ok(program) => program,
        Err(errors) => panic!("parse errors in {source:?}: {errors:?}"),
    }
}

/// Run `source` the way the driver does: macros first, then evaluation.
fn run(source: &str) -> (Value, String) {
    let out = buffer_handler();
    let mut interp = InterpreterBuilder::new().print_handler(out.clone()).build();
    let macro_env = Environment::new();
    let mut program = parse_ok(source);
    define_macros(&mut program, &macro_env);
    let program = match expand_macros(program, &macro_env, &mut interp) {
        Ok(program) => program,
        Err(err) => panic!("expansion failed: {err}"),
    };
    let value = interp.eval_program(&program, &Environment::new());
    (value, out.get_output())
}

#[test]
fn fibonacci() {
    let source = "
        let fibonacci = fn(x) {
            if (x == 0) {
                0
            } else {
                if (x == 1) {
                    return 1;
                } else {
                    fibonacci(x - 1) + fibonacci(x - 2);
                }
            }
        };
        fibonacci(20);";
    assert_eq!(run(source).0, Value::Integer(6765));
}

#[test]
fn map_and_reduce() {
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) {
                    result
                } else {
                    iter(rest(arr), f(result, first(arr)));
                }
            };
            iter(arr, initial);
        };
        let doubled = map([1, 2, 3, 4], fn(x) { x * 2 });
        puts(doubled);
        reduce(doubled, 0, fn(acc, x) { acc + x });";
    let (value, output) = run(source);
    assert_eq!(value, Value::Integer(20));
    assert_eq!(output, "[2, 4, 6, 8]\n");
}

#[test]
fn hash_of_people() {
    let source = r#"
        let people = [{"name": "Alice", "age": 24}, {"name": "Anna", "age": 28}];
        let getName = fn(person) { person["name"]; };
        getName(people[0]) + " and " + getName(people[1])"#;
    assert_eq!(run(source).0, Value::string("Alice and Anna"));
}

#[test]
fn unless_macro() {
    let source = r#"
        let unless = macro(condition, consequence, alternative) {
            quote(if (!(unquote(condition))) {
                unquote(consequence);
            } else {
                unquote(alternative);
            });
        };
        unless(10 > 5, puts("not greater"), puts("greater"));"#;
    let (value, output) = run(source);
    assert_eq!(value, Value::Null);
    assert_eq!(output, "greater\n");
}

#[test]
fn eval_builds_code_at_runtime() {
    let source = r#"
        let square = fn(n) { eval("n * n") };
        let code = "square(" + "7" + ")";
        eval(code)"#;
    assert_eq!(run(source).0, Value::Integer(49));
}

#[test]
fn evaluate_with_shared_registry() {
    let registry = ThreadRegistry::new();
    let env = Environment::new();

    let first = parse_ok("let h = launch(fn() { 21 * 2 });");
    let second = parse_ok("await(h)");
    evaluate(&first, &env, &registry);
    assert_eq!(evaluate(&second, &env, &registry), Value::Integer(42));
    assert_eq!(registry.len(), 1);
}

#[test]
fn errors_render_with_prefix() {
    let (value, _) = run("let x = 1; x + \"a\"");
    assert_eq!(value.inspect(), "ERROR: type mismatch: INTEGER + STRING");
}
