//! File element model.
//!
//! A [`FileElement`] is the piece of a page that references a file resource.
//! Page traversal and capture happen outside this crate; the element arrives
//! here already carrying its resource binding, optional id, and optional
//! caller-supplied body content.

use std::fmt;
use std::sync::Arc;

use crate::core::ResourceRef;
use crate::resource::ResourceStore;

/// A file reference element within a page.
///
/// The resource binding pairs the [`ResourceRef`] with the store serving its
/// book. The store is absent when the referencing book is inaccessible, in
/// which case only metadata inferred from the path string is available.
#[derive(Clone, Default)]
pub struct FileElement {
    resource: Option<(Option<Arc<dyn ResourceStore>>, ResourceRef)>,
    id: Option<String>,
    body: Option<String>,
    page: Option<String>,
    hidden: bool,
}

impl FileElement {
    /// Create an element bound to a resource.
    pub fn new(store: Option<Arc<dyn ResourceStore>>, reference: ResourceRef) -> Self {
        Self {
            resource: Some((store, reference)),
            ..Self::default()
        }
    }

    /// Create an element with no resource binding. Rendering it is a
    /// configuration error; this state exists so binding problems surface at
    /// render time with a proper diagnostic.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Caller-supplied body content; replaces the default filename label.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Path of the page declaring this element, for page-scoped id resolution.
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The resource binding, if any.
    pub fn resource(&self) -> Option<(Option<&dyn ResourceStore>, &ResourceRef)> {
        self.resource
            .as_ref()
            .map(|(store, reference)| (store.as_deref(), reference))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Whether the caller supplied non-empty body content.
    pub fn has_body(&self) -> bool {
        self.body.as_deref().is_some_and(|body| !body.is_empty())
    }

    pub fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    /// Hidden elements are skippable by outer traversal.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl fmt::Display for FileElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource {
            Some((_, reference)) => write!(f, "file[{reference}]"),
            None => f.write_str("file[unbound]"),
        }
    }
}

impl fmt::Debug for FileElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileElement")
            .field("resource", &self.resource.as_ref().map(|(_, r)| r))
            .field("id", &self.id)
            .field("body", &self.body)
            .field("page", &self.page)
            .field("hidden", &self.hidden)
            .finish()
    }
}
