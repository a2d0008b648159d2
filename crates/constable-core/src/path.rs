//! Namespace path parsing and parent/leaf splitting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConstError;

/// Separator between path segments.
pub const SEPARATOR: &str = "::";

/// An ordered sequence of segment names identifying one binding.
///
/// A leading `::` marks an explicit-root path and resolves identically to the
/// unprefixed form, so `::A::B` and `A::B` are the same path. The final
/// segment is the *leaf name*; the preceding segments resolve to the parent
/// container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConstPath {
    segments: Vec<String>,
}

impl ConstPath {
    /// Parse a path string, stripping an optional leading separator.
    ///
    /// Fails on an empty string or an empty segment (`A::::B`).
    pub fn parse(raw: &str) -> Result<Self, ConstError> {
        let trimmed = raw.strip_prefix(SEPARATOR).unwrap_or(raw);
        if trimmed.is_empty() {
            return Err(ConstError::InvalidPath(raw.to_string()));
        }
        let segments: Vec<String> = trimmed.split(SEPARATOR).map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ConstError::InvalidPath(raw.to_string()));
        }
        Ok(Self { segments })
    }

    /// Build a path from pre-split segments. Used by prefix/child derivation.
    fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment.
    pub fn leaf(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// True when the binding lives directly in the root scope.
    pub fn is_toplevel(&self) -> bool {
        self.segments.len() == 1
    }

    /// The path of the parent container. Empty for a top-level path; an empty
    /// parent denotes the root scope itself.
    pub fn parent(&self) -> Self {
        self.prefix(self.segments.len().saturating_sub(1))
    }

    /// The first `len` segments as a path.
    pub fn prefix(&self, len: usize) -> Self {
        Self::from_segments(self.segments[..len.min(self.segments.len())].to_vec())
    }

    /// This path extended by one child segment.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self::from_segments(segments)
    }
}

impl fmt::Display for ConstPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SEPARATOR))
    }
}

impl FromStr for ConstPath {
    type Err = ConstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConstPath {
    type Error = ConstError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ConstPath> for String {
    fn from(path: ConstPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separator() {
        let path = ConstPath::parse("A::B::C").unwrap();
        assert_eq!(path.segments(), ["A", "B", "C"]);
        assert_eq!(path.leaf(), "C");
        assert_eq!(path.parent().to_string(), "A::B");
    }

    #[test]
    fn leading_separator_resolves_to_same_path() {
        let rooted = ConstPath::parse("::TestClass::Nested").unwrap();
        let plain = ConstPath::parse("TestClass::Nested").unwrap();
        assert_eq!(rooted, plain);
    }

    #[test]
    fn toplevel_path() {
        let path = ConstPath::parse("X").unwrap();
        assert!(path.is_toplevel());
        assert!(path.parent().is_empty());
        assert_eq!(path.leaf(), "X");
    }

    #[test]
    fn rejects_empty_and_blank_segments() {
        assert!(ConstPath::parse("").is_err());
        assert!(ConstPath::parse("::").is_err());
        assert!(ConstPath::parse("A::::B").is_err());
    }

    #[test]
    fn prefix_and_child() {
        let path = ConstPath::parse("A::B::C::D").unwrap();
        assert_eq!(path.prefix(2).to_string(), "A::B");
        assert_eq!(path.prefix(2).child("Z").to_string(), "A::B::Z");
    }

    #[test]
    fn display_is_canonical_unprefixed_form() {
        let path = ConstPath::parse("::TestClass").unwrap();
        assert_eq!(path.to_string(), "TestClass");
    }

    #[test]
    fn ordering_is_lexicographic_by_segments() {
        let a = ConstPath::parse("A::B").unwrap();
        let b = ConstPath::parse("A::B::C").unwrap();
        assert!(a < b);
    }
}
