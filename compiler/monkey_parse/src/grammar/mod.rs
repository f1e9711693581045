//! Grammar Modules
//!
//! Each module extends `Parser` with methods for a group of productions:
//!
//! - [`stmt`]: `let`, `return`, expression statements and blocks
//! - [`expr`]: prefix/infix expressions, literals, calls, indexing

mod expr;
mod stmt;
