//! Resource path type for type-safe virtual path handling.
//!
//! - Internal representation: always decoded (human-readable)
//! - A trailing `/` means the path names a directory

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Path separator used in all resource paths.
pub const SEPARATOR: char = '/';

/// Path separator as a string slice.
pub const SEPARATOR_STR: &str = "/";

/// Decoded virtual path within a book.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Directory references end with `/`, file references do not
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourcePath(Arc<str>);

impl ResourcePath {
    /// Create from a decoded path string. Adds a leading slash if missing;
    /// the trailing slash is preserved as-is since it carries meaning.
    pub fn new(decoded: &str) -> Self {
        let trimmed = decoded.trim();

        if trimmed.is_empty() || trimmed == SEPARATOR_STR {
            return Self(Arc::from(SEPARATOR_STR));
        }

        if trimmed.starts_with(SEPARATOR) {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path names a directory by convention (trailing separator).
    #[inline]
    pub fn is_directory_path(&self) -> bool {
        self.0.ends_with(SEPARATOR)
    }

    /// Whether this is the book root (`/`).
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == SEPARATOR_STR
    }

    /// Derive the display filename: the final path segment.
    ///
    /// A single trailing separator is ignored, so `/a/b/` yields `b`.
    /// The book root `/` has no terminal segment and yields `None`.
    pub fn filename(&self) -> Option<&str> {
        let path = self.0.as_ref();
        let slash_before = if let Some(stripped) = path.strip_suffix(SEPARATOR) {
            stripped.rfind(SEPARATOR)
        } else {
            path.rfind(SEPARATOR)
        };
        let start = slash_before.map_or(0, |idx| idx + 1);
        let end = path.len() - usize::from(path.ends_with(SEPARATOR));
        let name = &path[start..end];
        if name.is_empty() { None } else { Some(name) }
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ResourcePath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AsRef<str> for ResourcePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourcePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ResourcePath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl PartialEq<str> for ResourcePath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for ResourcePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for ResourcePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourcePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_adds_leading_slash() {
        let path = ResourcePath::new("a/b");
        assert_eq!(path.as_str(), "/a/b");
    }

    #[test]
    fn test_new_preserves_trailing_slash() {
        let path = ResourcePath::new("/a/b/");
        assert_eq!(path.as_str(), "/a/b/");
        assert!(path.is_directory_path());
    }

    #[test]
    fn test_new_empty_is_root() {
        assert_eq!(ResourcePath::new("").as_str(), "/");
        assert_eq!(ResourcePath::new("/").as_str(), "/");
    }

    #[test]
    fn test_root_is_directory() {
        let root = ResourcePath::new("/");
        assert!(root.is_root());
        assert!(root.is_directory_path());
    }

    #[test]
    fn test_file_path_is_not_directory() {
        assert!(!ResourcePath::new("/a/b/c").is_directory_path());
    }

    #[test]
    fn test_filename_plain() {
        assert_eq!(ResourcePath::new("/a/b/c").filename().unwrap(), "c");
    }

    #[test]
    fn test_filename_directory() {
        assert_eq!(ResourcePath::new("/a/b/").filename().unwrap(), "b");
    }

    #[test]
    fn test_filename_top_level() {
        assert_eq!(ResourcePath::new("/readme.txt").filename().unwrap(), "readme.txt");
        assert_eq!(ResourcePath::new("/docs/").filename().unwrap(), "docs");
    }

    #[test]
    fn test_filename_root_is_none() {
        assert!(ResourcePath::new("/").filename().is_none());
    }

    #[test]
    fn test_equality_with_str() {
        let path = ResourcePath::new("/a/b");
        assert_eq!(path, "/a/b");
    }

    #[test]
    fn test_serialize_deserialize() {
        let path = ResourcePath::new("/docs/guide.pdf");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#""/docs/guide.pdf""#);

        let parsed: ResourcePath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn test_display() {
        let path = ResourcePath::new("/a/b/");
        assert_eq!(format!("{path}"), "/a/b/");
    }
}
