//! Lexical environments.
//!
//! An [`Environment`] is a shared handle to one scope: its own bindings plus
//! an optional link to the enclosing scope. Closures keep their defining
//! scope alive by holding a handle to it, and every function call, `eval`
//! and launched task gets a fresh scope enclosing the right parent.
//!
//! # Concurrency
//!
//! Launched tasks share ancestor scopes with the task that launched them.
//! Each scope guards its bindings with a `parking_lot::RwLock`, and writes
//! go only to the scope the handle points at, so a task's `let` bindings
//! land in its own frame and never in an ancestor.
//!
//! A closure stored in the scope it captured forms a reference cycle and
//! is never freed.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Bindings of a single scope plus its parent link.
struct Scope {
    bindings: RwLock<FxHashMap<String, Value>>,
    outer: Option<Environment>,
}

/// Shared handle to a scope. Cloning the handle shares the scope.
#[derive(Clone)]
pub struct Environment(Arc<Scope>);

impl Environment {
    /// A fresh top-level environment.
    pub fn new() -> Self {
        Environment(Arc::new(Scope {
            bindings: RwLock::new(FxHashMap::default()),
            outer: None,
        }))
    }

    /// A fresh, empty scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Environment) -> Self {
        Environment(Arc::new(Scope {
            bindings: RwLock::new(FxHashMap::default()),
            outer: Some(outer.clone()),
        }))
    }

    /// Look `name` up in this scope, then outward through enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut scope = &self.0;
        loop {
            if let Some(value) = scope.bindings.read().get(name) {
                return Some(value.clone());
            }
            match &scope.outer {
                Some(outer) => scope = &outer.0,
                None => return None,
            }
        }
    }

    /// Bind `name` in this scope (never an enclosing one), overwriting any
    /// existing local binding. Returns the stored value.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Value {
        self.0.bindings.write().insert(name.into(), value.clone());
        value
    }

    /// Whether `name` is bound in this scope itself.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.bindings.read().contains_key(name)
    }

    /// The enclosing scope, if any.
    pub fn outer(&self) -> Option<&Environment> {
        self.0.outer.as_ref()
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.0.bindings.read().keys().cloned().collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_outer", &self.0.outer.is_some())
            .finish()
    }
}
