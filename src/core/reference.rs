//! References to books and the resources inside them.
//!
//! A book is a named content partition owning a namespace of resource paths;
//! a domain groups one or more books. Both reference types are immutable
//! value types, cheap to clone and safe to share across renders.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::path::ResourcePath;

/// Reference to a book: a domain plus the book's path within that domain.
///
/// The book path doubles as the URL prefix for resources in the book,
/// except the root book `/` whose prefix is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRef {
    domain: Arc<str>,
    path: Arc<str>,
}

impl BookRef {
    pub fn new(domain: impl Into<Arc<str>>, path: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            path: path.into(),
        }
    }

    /// The domain grouping this book.
    #[inline]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The book's path within its domain.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// URL prefix contributed by this book.
    ///
    /// The root book `/` contributes nothing so resource paths attach
    /// directly to the context path.
    pub fn prefix(&self) -> &str {
        if self.path.as_ref() == "/" { "" } else { &self.path }
    }
}

impl std::fmt::Display for BookRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.domain, self.path)
    }
}

/// Reference to a single resource: the owning book plus the virtual path
/// within it. Uniquely identifies a resource across the whole site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    book: BookRef,
    path: ResourcePath,
}

impl ResourceRef {
    pub fn new(book: BookRef, path: impl Into<ResourcePath>) -> Self {
        Self {
            book,
            path: path.into(),
        }
    }

    #[inline]
    pub fn book(&self) -> &BookRef {
        &self.book
    }

    #[inline]
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.book, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> BookRef {
        BookRef::new("example.com", "/docs")
    }

    #[test]
    fn test_prefix_regular_book() {
        assert_eq!(book().prefix(), "/docs");
    }

    #[test]
    fn test_prefix_root_book() {
        let root = BookRef::new("example.com", "/");
        assert_eq!(root.prefix(), "");
    }

    #[test]
    fn test_resource_ref_accessors() {
        let rref = ResourceRef::new(book(), "/guide/setup.pdf");
        assert_eq!(rref.book().domain(), "example.com");
        assert_eq!(rref.path().as_str(), "/guide/setup.pdf");
    }

    #[test]
    fn test_display() {
        let rref = ResourceRef::new(book(), "/a/b");
        assert_eq!(format!("{rref}"), "example.com:/docs!/a/b");
    }
}
