//! Symbol types - name-to-value bindings declared within a scope
//!
//! A symbol records which scope declared it, the name it is bound under,
//! and an optional caller-defined payload. Symbols are created and
//! replaced only through [`ScopeTree::add_symbol`](crate::ScopeTree::add_symbol)
//! and friends; they have no storage outside their scope's binding map.

use crate::scope::ScopeId;
use serde::{Deserialize, Serialize};

/// A binding of a name to an optional value, declared in exactly one scope.
///
/// The scope link is an association, not ownership: a symbol holds the
/// declaring scope's id, not the scope itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol<V> {
    /// Id of the scope that declared this binding
    scope: ScopeId,
    /// Name the binding is stored under in its scope
    name: String,
    /// Optional caller-defined payload
    value: Option<V>,
}

impl<V> Symbol<V> {
    /// Construct a binding for a scope's map; the name must match the
    /// key it is stored under.
    pub(crate) fn new(scope: ScopeId, name: impl Into<String>, value: Option<V>) -> Self {
        Self {
            scope,
            name: name.into(),
            value,
        }
    }

    /// Id of the scope this symbol was declared in
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The bound name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound value, if one was supplied
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }
}
