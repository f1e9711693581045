//! Stack growth for deeply recursive parsing and evaluation.
//!
//! The parser and the evaluator are plain recursive descent over the syntax
//! tree. A user program such as `fn(n) { if (n == 0) { 0 } else { f(n - 1) } }`
//! recurses once per call, so native stack limits would otherwise bound the
//! depth of user recursion. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] moves that bound to the evaluator's own call
//! depth limit.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// Passthrough on WASM.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
