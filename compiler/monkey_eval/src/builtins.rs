//! General builtin table.
//!
//! Consulted after environment lookup fails, so user bindings shadow these
//! names (unlike the intrinsics `eval`, `launch` and `await`).

use crate::errors::{len_not_supported, requires_array, wrong_arg_count};
use crate::print_handler::PrintHandlerImpl;
use crate::value::{Builtin, Value};

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

/// The builtin registered under `name`.
pub fn lookup_builtin(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

/// Every general builtin, in registration order.
pub fn builtins() -> &'static [Builtin] {
    BUILTINS
}

fn check_arity(args: &[Value], want: usize) -> Result<(), Value> {
    if args.len() == want {
        Ok(())
    } else {
        Err(wrong_arg_count(args.len(), want))
    }
}

/// The single array argument of `name`.
fn array_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a [Value], Value> {
    check_arity(args, 1)?;
    match &args[0] {
        Value::Array(elements) => Ok(elements.as_slice()),
        other => Err(requires_array(name, other)),
    }
}

fn builtin_len(args: &[Value], _: &PrintHandlerImpl) -> Value {
    if let Err(err) = check_arity(args, 1) {
        return err;
    }
    let len = match &args[0] {
        Value::String(s) => s.len(),
        Value::Array(elements) => elements.len(),
        other => return len_not_supported(other),
    };
    Value::Integer(i64::try_from(len).unwrap_or(i64::MAX))
}

fn builtin_first(args: &[Value], _: &PrintHandlerImpl) -> Value {
    match array_arg("first", args) {
        Ok(elements) => elements.first().cloned().unwrap_or(Value::Null),
        Err(err) => err,
    }
}

fn builtin_last(args: &[Value], _: &PrintHandlerImpl) -> Value {
    match array_arg("last", args) {
        Ok(elements) => elements.last().cloned().unwrap_or(Value::Null),
        Err(err) => err,
    }
}

fn builtin_rest(args: &[Value], _: &PrintHandlerImpl) -> Value {
    match array_arg("rest", args) {
        Ok([]) => Value::Null,
        Ok([_, tail @ ..]) => Value::array(tail.to_vec()),
        Err(err) => err,
    }
}

fn builtin_push(args: &[Value], _: &PrintHandlerImpl) -> Value {
    if let Err(err) = check_arity(args, 2) {
        return err;
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend_from_slice(elements);
            extended.push(args[1].clone());
            Value::array(extended)
        }
        other => requires_array("push", other),
    }
}

fn builtin_puts(args: &[Value], out: &PrintHandlerImpl) -> Value {
    for arg in args {
        out.println(&arg.inspect());
    }
    Value::Null
}
