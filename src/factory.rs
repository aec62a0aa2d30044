//! Identifier factory - mints and composes dotted-path identifiers
//!
//! The factory owns a namespace and records every identifier it has
//! produced. Composition appends a suffix path to a base path, eliding
//! the single longest run of segments shared between the tail of the
//! base and the head of the suffix, so re-entering a qualifier that
//! already shares a prefix with the base does not duplicate it.

use crate::ident::{DELIMITER, Identifier};
use crate::{Error, Result};
use std::collections::HashSet;

/// Mints [`Identifier`]s within a single namespace and tracks the set of
/// all identifiers it has produced.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFactory {
    /// Namespace stamped onto every minted identifier
    namespace: String,
    /// Value-keyed set of every identifier returned so far
    defined: HashSet<Identifier>,
}

impl IdentifierFactory {
    /// Create a factory for the given namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            defined: HashSet::new(),
        }
    }

    /// The namespace this factory mints under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Mint an identifier from a dotted name.
    ///
    /// Splits `name` on the `.` delimiter and validates that the name is
    /// non-blank and contains no empty segment. Repeating a name yields a
    /// value-equal identifier; the defined-set does not grow on a repeat.
    pub fn make(&mut self, name: &str) -> Result<Identifier> {
        let segments = split_name(name)?;
        Ok(self.mint(segments))
    }

    /// Compose `base` with a dotted suffix, eliding a duplicated overlap.
    ///
    /// If some non-empty trailing run of `base`'s segments equals the
    /// leading run of the suffix, that run appears only once in the
    /// result; with no overlap the suffix is appended in full. The result
    /// is minted and recorded exactly as [`make`](Self::make) would.
    pub fn resolve(&mut self, base: &Identifier, suffix: &str) -> Result<Identifier> {
        let tail = split_name(suffix)?;
        Ok(self.mint(compose(base.segments(), &tail)))
    }

    /// Compose `base` with a suffix given as a segment list.
    ///
    /// An empty list composes to the base path itself. Elements may
    /// themselves be dotted; they are split and validated the same way
    /// [`make`](Self::make) validates a name.
    pub fn resolve_segments<S: AsRef<str>>(
        &mut self,
        base: &Identifier,
        suffix: &[S],
    ) -> Result<Identifier> {
        let mut tail = Vec::new();
        for part in suffix {
            tail.extend(split_name(part.as_ref())?);
        }
        Ok(self.mint(compose(base.segments(), &tail)))
    }

    /// The set of all identifiers this factory has produced.
    ///
    /// Value-keyed: structurally identical identifiers are stored once.
    /// Never contains identifiers minted by another factory instance.
    pub fn defined(&self) -> &HashSet<Identifier> {
        &self.defined
    }

    fn mint(&mut self, segments: Vec<String>) -> Identifier {
        let id = Identifier::new(&self.namespace, segments);
        self.defined.insert(id.clone());
        id
    }
}

/// Split a dotted name into validated segments.
fn split_name(name: &str) -> Result<Vec<String>> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName(format!("empty or blank name: {name:?}")));
    }
    let segments: Vec<String> = name.split(DELIMITER).map(str::to_string).collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(Error::InvalidName(format!(
            "name contains an empty segment: {name:?}"
        )));
    }
    Ok(segments)
}

/// Append `suffix` to `base`, collapsing the single longest run of
/// segments shared between the end of `base` and the start of `suffix`.
fn compose(base: &[String], suffix: &[String]) -> Vec<String> {
    let max = base.len().min(suffix.len());
    let overlap = (1..=max)
        .rev()
        .find(|&k| base[base.len() - k..] == suffix[..k])
        .unwrap_or(0);
    if overlap > 0 {
        tracing::trace!(
            "eliding {} shared segment(s) composing {:?} + {:?}",
            overlap,
            base,
            suffix
        );
    }
    base.iter().chain(&suffix[overlap..]).cloned().collect()
}
