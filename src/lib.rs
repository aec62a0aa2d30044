//! # Lexbind - Hierarchical identifiers and lexical scope resolution
//!
//! Lexbind provides:
//! - Immutable dotted-path identifiers minted within a caller-defined namespace
//! - An identifier factory with overlap-eliding path composition
//! - A parent-linked scope tree with insertion-ordered name bindings
//! - Progressive (innermost-first) resolution with lexical shadowing

pub mod factory;
pub mod ident;
pub mod scope;
pub mod symbol;

// Re-exports for convenient access
pub use factory::IdentifierFactory;
pub use ident::Identifier;
pub use scope::{ScopeId, ScopeKind, ScopeTree};
pub use symbol::Symbol;

/// Result type alias for Lexbind operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Lexbind operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid name: {0}")]
    InvalidName(String),
}
