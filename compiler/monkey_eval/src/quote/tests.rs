use super::*;
use crate::print_handler::silent_handler;
use crate::interpreter::InterpreterBuilder;
use monkey_parse::parse;
use pretty_assertions::assert_eq;

fn run(source: &str) -> Value {
    let program = match parse(source).into_result() {
        Ok(program) => program,
        Err(errors) => panic!("parse errors in {source:?}: {errors:?}"),
    };
    InterpreterBuilder::new()
        .print_handler(silent_handler())
        .build()
        .eval_program(&program, &Environment::new())
}

#[test]
fn quote_keeps_syntax_unevaluated() {
    let cases = [
        ("quote(5)", "QUOTE(5)"),
        ("quote(5 + 8)", "QUOTE((5 + 8))"),
        ("quote(foobar)", "QUOTE(foobar)"),
        ("quote(foobar + barfoo)", "QUOTE((foobar + barfoo))"),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source).inspect(), expected, "source: {source}");
    }
}

#[test]
fn unquote_substitutes_evaluated_values() {
    let cases = [
        ("quote(unquote(4))", "QUOTE(4)"),
        ("quote(unquote(4 + 4))", "QUOTE(8)"),
        ("quote(8 + unquote(4 + 4))", "QUOTE((8 + 8))"),
        ("quote(unquote(4 + 4) + 8)", "QUOTE((8 + 8))"),
        ("let foobar = 8; quote(foobar)", "QUOTE(foobar)"),
        ("let foobar = 8; quote(unquote(foobar))", "QUOTE(8)"),
        ("quote(unquote(true))", "QUOTE(true)"),
        ("quote(unquote(true == false))", "QUOTE(false)"),
        ("quote(unquote(\"text\"))", "QUOTE(\"text\")"),
        ("quote(unquote(quote(4 + 4)))", "QUOTE((4 + 4))"),
        (
            "let quotedInfixExpression = quote(4 + 4);
             quote(unquote(4 + 4) + unquote(quotedInfixExpression))",
            "QUOTE((8 + (4 + 4)))",
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source).inspect(), expected, "source: {source}");
    }
}

#[test]
fn unquote_of_value_without_syntax_is_left_alone() {
    assert_eq!(
        run("quote(unquote([1, 2]))").inspect(),
        "QUOTE(unquote([1, 2]))"
    );
}

#[test]
fn unquote_inside_function_bodies() {
    assert_eq!(
        run("let x = 3; quote(fn(y) { y + unquote(x) })").inspect(),
        "QUOTE(fn(y) { (y + 3) })"
    );
}

#[test]
fn unquote_error_aborts_quote() {
    assert_eq!(
        run("quote(unquote(nope))").as_error(),
        Some("identifier not found: nope")
    );
    assert_eq!(
        run("quote(1 + unquote(1 / 0))").as_error(),
        Some("division by zero")
    );
    assert_eq!(
        run("let f = fn() { quote(unquote(missing)) }; f()").as_error(),
        Some("identifier not found: missing")
    );
}

#[test]
fn unquote_strips_return_wrapper() {
    assert_eq!(
        run("quote(unquote(if (true) { return 2 }))").inspect(),
        "QUOTE(2)"
    );
}

#[test]
fn quote_without_argument() {
    assert_eq!(
        run("quote()").as_error(),
        Some("wrong number of arguments. got=0, want=1")
    );
}

#[test]
fn value_to_node_conversions() {
    assert_eq!(value_to_node(&Value::Integer(-3)), Some(Expr::Integer(-3)));
    assert_eq!(value_to_node(&Value::Boolean(true)), Some(Expr::Boolean(true)));
    assert_eq!(
        value_to_node(&Value::string("s")),
        Some(Expr::String("s".to_string()))
    );
    assert_eq!(
        value_to_node(&Value::quote(Expr::Identifier("x".to_string()))),
        Some(Expr::Identifier("x".to_string()))
    );
    assert_eq!(value_to_node(&Value::Null), None);
}
