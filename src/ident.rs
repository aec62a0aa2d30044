//! Identifier - Immutable dotted-path identity within a namespace
//!
//! Display form: `<segment>.<segment>...`
//!
//! Examples:
//! - `alpha.beta.gamma`
//! - `graph.node.label`
//!
//! Identifiers are minted only by an [`IdentifierFactory`](crate::IdentifierFactory),
//! which validates the dotted name and records every identifier it produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter between path segments in display form and dotted input names.
pub const DELIMITER: char = '.';

/// An immutable dotted-path identifier.
///
/// Equality and hashing are structural over `(namespace, segments)`:
/// two identifiers minted separately but with identical namespace and
/// segments are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Namespace the identifier belongs to (fixed at factory construction)
    namespace: String,
    /// Ordered, non-empty sequence of path segments
    segments: Vec<String>,
}

impl Identifier {
    /// Construct an identifier from pre-validated segments.
    ///
    /// Callers go through [`IdentifierFactory`](crate::IdentifierFactory),
    /// which guarantees the segment sequence is non-empty and every
    /// segment is non-blank.
    pub(crate) fn new(namespace: impl Into<String>, segments: Vec<String>) -> Self {
        Self {
            namespace: namespace.into(),
            segments,
        }
    }

    /// The namespace this identifier was minted under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The display name: segments joined with the `.` delimiter
    pub fn name(&self) -> String {
        self.segments.join(".")
    }

    /// All path segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// A single segment by position
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Number of path segments (always at least 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the identifier has no segments; never true for a
    /// factory-minted identifier
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final path segment
    pub fn last_segment(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
