//! Runtime values for the Monkey interpreter.
//!
//! # Heap Payloads
//!
//! Strings, arrays, hashes, closures, quotes and errors live behind
//! [`Heap<T>`], whose constructor is private to this module. Values are
//! built through the factory methods on [`Value`]:
//!
//! ```text
//! let s = Value::string("hello");
//! let arr = Value::array(vec![Value::Integer(1)]);
//! let err = Value::error("identifier not found: x");
//! ```
//!
//! # Equality
//!
//! There are two notions of equality:
//!
//! - [`Value::identical`] is what the language's `==` uses on non-scalar
//!   operands: composite values compare by allocation, so two arrays with
//!   equal contents are not `==`.
//! - `PartialEq` is structural and exists for hosts and tests.
//!
//! # Thread Safety
//!
//! Every payload is `Arc`-backed, so a `Value` is `Send + Sync` and can be
//! handed to a launched task or sent through a result channel.

mod composite;
mod heap;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use monkey_ir::{Expr, FunctionLiteral};

use crate::environment::Environment;
use crate::thread_registry::ThreadId;

pub use composite::{Builtin, BuiltinFn, FunctionValue, Intrinsic};
pub use heap::Heap;

/// Key of a hash value. Only integers, booleans and strings are hashable.
///
/// The derived ordering (integers, then booleans, then strings) gives hash
/// values a deterministic rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    /// The value this key was derived from.
    pub fn to_value(&self) -> Value {
        match self {
            HashKey::Integer(n) => Value::Integer(*n),
            HashKey::Boolean(b) => Value::Boolean(*b),
            HashKey::String(s) => Value::string(s.as_str()),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(n) => write!(f, "{n}"),
            HashKey::Boolean(b) => write!(f, "{b}"),
            HashKey::String(s) => f.write_str(s),
        }
    }
}

/// Entries of a hash value, ordered by key.
pub type HashPairs = BTreeMap<HashKey, Value>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Scalars (inline)
    Integer(i64),
    Boolean(bool),
    Null,

    // Heap types (constructed through factory methods)
    String(Heap<String>),
    Array(Heap<Vec<Value>>),
    Hash(Heap<HashPairs>),
    /// User function (closure).
    Function(Heap<FunctionValue>),
    /// Wrapper produced by `return`; unwrapped by the nearest enclosing
    /// function call or program, never stored or operated on.
    Return(Heap<Value>),
    /// Language-level error. Propagates through every composite evaluation.
    Error(Heap<String>),
    /// Unevaluated syntax produced by `quote`.
    Quote(Heap<Expr>),
    /// Macro definition (only ever bound in a macro environment).
    Macro(Heap<FunctionValue>),

    // Natives
    /// Entry of the general builtin table.
    Builtin(Builtin),
    /// `eval`, `launch` or `await`.
    Intrinsic(Intrinsic),
    /// Handle of a launched task.
    ThreadHandle(ThreadId),
}

// Factory methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Heap::new(elements))
    }

    #[inline]
    pub fn hash(pairs: HashPairs) -> Self {
        Value::Hash(Heap::new(pairs))
    }

    /// Close `literal` over `env`.
    #[inline]
    pub fn function(literal: Arc<FunctionLiteral>, env: Environment) -> Self {
        Value::Function(Heap::new(FunctionValue::new(literal, env)))
    }

    #[inline]
    pub fn macro_value(literal: Arc<FunctionLiteral>, env: Environment) -> Self {
        Value::Macro(Heap::new(FunctionValue::new(literal, env)))
    }

    #[inline]
    pub fn return_value(value: Value) -> Self {
        Value::Return(Heap::new(value))
    }

    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(Heap::new(message.into()))
    }

    #[inline]
    pub fn quote(node: Expr) -> Self {
        Value::Quote(Heap::new(node))
    }
}

// Value methods

impl Value {
    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::String(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Return(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
            Value::Quote(_) => "QUOTE",
            Value::Macro(_) => "MACRO",
            Value::Builtin(_) | Value::Intrinsic(_) => "BUILTIN",
            Value::ThreadHandle(_) => "THREAD_HANDLE",
        }
    }

    /// `null` and `false` are falsy; everything else, including `0` and
    /// `""`, is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Errors and `return` wrappers both end evaluation of the enclosing
    /// expression and travel up to the nearest block or call unchanged.
    #[inline]
    pub fn is_return_or_error(&self) -> bool {
        matches!(self, Value::Return(_) | Value::Error(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Message of an error value.
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Value::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Key for this value, or `None` if it cannot be used as a hash key.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey::Integer(*n)),
            Value::Boolean(b) => Some(HashKey::Boolean(*b)),
            Value::String(s) => Some(HashKey::String(String::clone(s))),
            _ => None,
        }
    }

    /// Strip a `return` wrapper, if any.
    pub fn unwrap_return(self) -> Value {
        match self {
            Value::Return(inner) => Value::clone(&inner),
            other => other,
        }
    }

    /// Identity comparison used by `==` for operands that are not both
    /// integers or both strings.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::String(a), Value::String(b)) | (Value::Error(a), Value::Error(b)) => {
                Heap::ptr_eq(a, b)
            }
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Heap::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) | (Value::Macro(a), Value::Macro(b)) => {
                Heap::ptr_eq(a, b)
            }
            (Value::Return(a), Value::Return(b)) => Heap::ptr_eq(a, b),
            (Value::Quote(a), Value::Quote(b)) => Heap::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Intrinsic(a), Value::Intrinsic(b)) => a == b,
            (Value::ThreadHandle(a), Value::ThreadHandle(b)) => a == b,
            _ => false,
        }
    }

    /// Text shown by the REPL and by `puts`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

fn write_separated<'a, T, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::String(s) => f.write_str(s),
            Value::Array(elements) => {
                f.write_str("[")?;
                write_separated(f, elements.iter())?;
                f.write_str("]")
            }
            Value::Hash(pairs) => {
                f.write_str("{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Function(func) => {
                f.write_str("fn")?;
                func.fmt_signature_and_body(f)
            }
            Value::Macro(mac) => {
                f.write_str("macro")?;
                mac.fmt_signature_and_body(f)
            }
            Value::Return(inner) => write!(f, "{}", **inner),
            Value::Error(message) => write!(f, "ERROR: {}", **message),
            Value::Quote(node) => write!(f, "QUOTE({})", **node),
            Value::Builtin(_) | Value::Intrinsic(_) => f.write_str("builtin function"),
            Value::ThreadHandle(id) => write!(f, "thread#{id}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Null => f.write_str("Null"),
            Value::String(s) => write!(f, "String({:?})", **s),
            Value::Array(elements) => f.debug_tuple("Array").field(&**elements).finish(),
            Value::Hash(pairs) => f.debug_tuple("Hash").field(&**pairs).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(&**func).finish(),
            Value::Macro(mac) => f.debug_tuple("Macro").field(&**mac).finish(),
            Value::Return(inner) => f.debug_tuple("Return").field(&**inner).finish(),
            Value::Error(message) => write!(f, "Error({:?})", **message),
            Value::Quote(node) => write!(f, "Quote({})", **node),
            Value::Builtin(builtin) => write!(f, "{builtin:?}"),
            Value::Intrinsic(intrinsic) => write!(f, "Intrinsic({})", intrinsic.name()),
            Value::ThreadHandle(id) => write!(f, "ThreadHandle({id})"),
        }
    }
}

/// Structural equality. Closures and quotes still compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) | (Value::Error(a), Value::Error(b)) => **a == **b,
            (Value::Array(a), Value::Array(b)) => **a == **b,
            (Value::Hash(a), Value::Hash(b)) => **a == **b,
            (Value::Return(a), Value::Return(b)) => **a == **b,
            _ => self.identical(other),
        }
    }
}
