//! Scope tree data structure for name binding
//!
//! The tree tracks:
//! - Scope hierarchy (each scope's parent is fixed at construction)
//! - Insertion-ordered bindings within each scope
//! - Progressive lookup from a scope outward to the root

use crate::symbol::Symbol;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for a scope.
///
/// The wrapped value is the scope's generation ordinal: ids are handed
/// out in increasing order as scopes are created, so a child's id is
/// always greater than its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The root scope id
    pub fn root() -> Self {
        Self(0)
    }

    /// Creation ordinal of this scope within its tree
    pub fn generation(&self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    /// Top-level scope; every tree has exactly one
    Root,
    /// Function/method body scope
    Function,
    /// Nested block scope (if, loop, etc.)
    Block,
}

impl ScopeKind {
    /// Get the string representation of the scope kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Root => "root",
            ScopeKind::Function => "function",
            ScopeKind::Block => "block",
        }
    }

    /// Get all scope kinds
    pub fn all() -> &'static [ScopeKind] {
        &[ScopeKind::Root, ScopeKind::Function, ScopeKind::Block]
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage for a single scope
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScopeData<V> {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    /// Bindings in declaration order; one live binding per name
    symbols: IndexMap<String, Symbol<V>>,
}

/// Parent-linked tree of scopes with shadowed, innermost-first lookup.
///
/// `V` is the caller-defined payload carried by bindings. Scopes are
/// addressed by the [`ScopeId`]s this tree hands out; ids from another
/// tree are meaningless here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeTree<V> {
    scopes: Vec<ScopeData<V>>,
}

impl<V> ScopeTree<V> {
    /// Create a new tree seeded with a root scope
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeData {
                kind: ScopeKind::Root,
                parent: None,
                symbols: IndexMap::new(),
            }],
        }
    }

    /// Create a new child scope under `parent`
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(ScopeData {
            kind,
            parent: Some(parent),
            symbols: IndexMap::new(),
        });
        id
    }

    /// Get the kind of a scope
    pub fn kind(&self, scope: ScopeId) -> Option<ScopeKind> {
        self.scopes.get(scope.index()).map(|data| data.kind)
    }

    /// Get the parent of a scope; `None` for the root
    pub fn enclosing_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes.get(scope.index()).and_then(|data| data.parent)
    }

    /// Bind `name` in `scope` with no payload, replacing any existing
    /// binding for that name in this scope only
    pub fn add_symbol(&mut self, scope: ScopeId, name: impl Into<String>) {
        self.insert(scope, name.into(), None);
    }

    /// Bind `name` in `scope` with a payload value; last write wins
    pub fn add_symbol_with(&mut self, scope: ScopeId, name: impl Into<String>, value: V) {
        self.insert(scope, name.into(), Some(value));
    }

    fn insert(&mut self, scope: ScopeId, name: String, value: Option<V>) {
        let symbol = Symbol::new(scope, name.clone(), value);
        self.scopes[scope.index()].symbols.insert(name, symbol);
    }

    /// Look up a binding in this scope only, no parent walk
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<&Symbol<V>> {
        self.scopes.get(scope.index())?.symbols.get(name)
    }

    /// Look up a binding walking from `scope` outward to the root.
    ///
    /// The closest scope wins: a local binding shadows any ancestor
    /// binding with the same name. Absence is a normal result.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<&Symbol<V>> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(symbol) = self.lookup_local(id, name) {
                return Some(symbol);
            }
            current = self.enclosing_scope(id);
        }
        tracing::trace!("name {:?} unresolved from scope {}", name, scope.0);
        None
    }

    /// Look up a qualifier-disambiguated binding.
    ///
    /// The lookup key is `name` followed by `args` joined with the `.`
    /// delimiter; the walk is the same as [`resolve`](Self::resolve) and
    /// requires an exact key match.
    pub fn resolve_qualified<S: AsRef<str>>(
        &self,
        scope: ScopeId,
        name: &str,
        args: &[S],
    ) -> Option<&Symbol<V>> {
        if args.is_empty() {
            return self.resolve(scope, name);
        }
        let mut key = String::from(name);
        for arg in args {
            key.push('.');
            key.push_str(arg.as_ref());
        }
        self.resolve(scope, &key)
    }

    /// Get the scope chain from a scope up to the root
    pub fn scope_chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = vec![scope];
        let mut current = scope;
        while let Some(parent) = self.enclosing_scope(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Get a scope's bindings in declaration order
    pub fn symbols_in(&self, scope: ScopeId) -> Vec<&Symbol<V>> {
        self.scopes
            .get(scope.index())
            .map(|data| data.symbols.values().collect())
            .unwrap_or_default()
    }

    /// Number of scopes in the tree (root included)
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether the tree holds no scopes; a freshly built tree never is,
    /// since the root scope is created with it
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl<V> Default for ScopeTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_hierarchy() {
        let mut tree: ScopeTree<()> = ScopeTree::new();

        let func_scope = tree.add_scope(ScopeId::root(), ScopeKind::Function);
        let block_scope = tree.add_scope(func_scope, ScopeKind::Block);

        assert_eq!(tree.enclosing_scope(block_scope), Some(func_scope));
        assert_eq!(tree.enclosing_scope(func_scope), Some(ScopeId::root()));
        assert_eq!(tree.enclosing_scope(ScopeId::root()), None);
        assert_eq!(tree.kind(func_scope), Some(ScopeKind::Function));
        assert_eq!(tree.kind(ScopeId::root()), Some(ScopeKind::Root));
    }

    #[test]
    fn test_generation_is_monotonic() {
        let mut tree: ScopeTree<()> = ScopeTree::new();
        let a = tree.add_scope(ScopeId::root(), ScopeKind::Function);
        let b = tree.add_scope(a, ScopeKind::Block);

        assert_eq!(ScopeId::root().generation(), 0);
        assert!(a.generation() > ScopeId::root().generation());
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn test_resolve_walks_to_ancestor() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Function);

        tree.add_symbol_with(ScopeId::root(), "global", 1);

        let found = tree.resolve(child, "global").unwrap();
        assert_eq!(found.scope(), ScopeId::root());
        assert_eq!(found.value(), Some(&1));

        // Local map alone does not see the ancestor binding
        assert!(tree.lookup_local(child, "global").is_none());
    }

    #[test]
    fn test_shadowing_closer_scope_wins() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Block);

        tree.add_symbol_with(ScopeId::root(), "x", 1);
        tree.add_symbol_with(child, "x", 2);

        assert_eq!(tree.resolve(child, "x").unwrap().value(), Some(&2));
        assert_eq!(tree.resolve(ScopeId::root(), "x").unwrap().value(), Some(&1));
    }

    #[test]
    fn test_resolve_undefined_is_absent() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Function);
        let inner = tree.add_scope(child, ScopeKind::Block);

        assert!(tree.resolve(inner, "undefinedName").is_none());
    }

    #[test]
    fn test_redefinition_last_write_wins() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();

        tree.add_symbol_with(ScopeId::root(), "x", 1);
        tree.add_symbol_with(ScopeId::root(), "x", 2);

        let symbols = tree.symbols_in(ScopeId::root());
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].value(), Some(&2));
    }

    #[test]
    fn test_valueless_binding_resolves() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        tree.add_symbol(ScopeId::root(), "marker");

        let found = tree.resolve(ScopeId::root(), "marker").unwrap();
        assert_eq!(found.name(), "marker");
        assert_eq!(found.value(), None);
    }

    #[test]
    fn test_qualified_resolution() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Function);

        tree.add_symbol_with(ScopeId::root(), "f.int.int", 1);
        tree.add_symbol_with(ScopeId::root(), "f.str", 2);

        let found = tree
            .resolve_qualified(child, "f", &["int", "int"])
            .unwrap();
        assert_eq!(found.value(), Some(&1));

        // Differing argument lists require an exact key match
        assert!(tree.resolve_qualified(child, "f", &["int"]).is_none());

        // Empty argument list degrades to a plain lookup
        assert!(tree.resolve_qualified::<&str>(child, "f", &[]).is_none());
        assert_eq!(
            tree.resolve_qualified::<&str>(child, "f.str", &[])
                .unwrap()
                .value(),
            Some(&2)
        );
    }

    #[test]
    fn test_qualified_shadowing() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Function);

        tree.add_symbol_with(ScopeId::root(), "f.int", 1);
        tree.add_symbol_with(child, "f.int", 2);

        let found = tree.resolve_qualified(child, "f", &["int"]).unwrap();
        assert_eq!(found.value(), Some(&2));
        assert_eq!(found.scope(), child);
    }

    #[test]
    fn test_symbols_in_declaration_order() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();

        tree.add_symbol_with(ScopeId::root(), "a", 1);
        tree.add_symbol_with(ScopeId::root(), "b", 2);
        tree.add_symbol_with(ScopeId::root(), "c", 3);
        // Replacing keeps the original position
        tree.add_symbol_with(ScopeId::root(), "a", 10);

        let names: Vec<&str> = tree
            .symbols_in(ScopeId::root())
            .iter()
            .map(|s| s.name())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(
            tree.resolve(ScopeId::root(), "a").unwrap().value(),
            Some(&10)
        );
    }

    #[test]
    fn test_scope_chain() {
        let mut tree: ScopeTree<()> = ScopeTree::new();

        let s1 = tree.add_scope(ScopeId::root(), ScopeKind::Function);
        let s2 = tree.add_scope(s1, ScopeKind::Block);
        let s3 = tree.add_scope(s2, ScopeKind::Block);

        let chain = tree.scope_chain(s3);
        assert_eq!(chain, vec![s3, s2, s1, ScopeId::root()]);
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let left = tree.add_scope(ScopeId::root(), ScopeKind::Block);
        let right = tree.add_scope(ScopeId::root(), ScopeKind::Block);

        tree.add_symbol_with(left, "x", 1);

        assert!(tree.resolve(right, "x").is_none());
        assert!(tree.resolve(left, "x").is_some());
    }

    #[test]
    fn test_scope_kind_display() {
        for kind in ScopeKind::all() {
            assert!(!kind.as_str().is_empty());
        }
        assert_eq!(ScopeKind::Function.to_string(), "function");
    }

    #[test]
    fn test_tree_serde_roundtrip() {
        let mut tree: ScopeTree<i32> = ScopeTree::new();
        let child = tree.add_scope(ScopeId::root(), ScopeKind::Function);
        tree.add_symbol_with(ScopeId::root(), "x", 1);
        tree.add_symbol_with(child, "y", 2);

        let json = serde_json::to_string(&tree).unwrap();
        let back: ScopeTree<i32> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), tree.len());
        assert_eq!(back.resolve(child, "x").unwrap().value(), Some(&1));
        assert_eq!(back.resolve(child, "y").unwrap().value(), Some(&2));
    }
}
