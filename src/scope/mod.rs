//! Scope tree - lexical name binding
//!
//! Scopes form a parent-linked tree. Each scope holds an
//! insertion-ordered map of name bindings; resolution checks the current
//! scope first and walks outward until a match or the root is reached.

pub mod tree;

pub use tree::{ScopeId, ScopeKind, ScopeTree};
