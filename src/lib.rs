//! fileref - render references to file resources as hyperlinks in
//! book-structured generated sites.
//!
//! A site is partitioned into books (namespaces of resource paths) grouped
//! under domains. A [`FileElement`] on a page references one resource; this
//! crate decides, at render time, whether that resource is locally openable,
//! whether it is a directory, which URL to emit, and what caching metadata to
//! attach, then binds the result to `<a>` markup.
//!
//! # Example
//!
//! ```
//! use fileref::{BookRef, FileElement, RenderEnv, ResourceRef, render_file_link};
//! use fileref::resource::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = MemoryStore::new("docs");
//! store.insert("/guide.pdf", &b"%PDF"[..], 0x1a2b);
//!
//! let reference = ResourceRef::new(BookRef::new("example.com", "/docs"), "/guide.pdf");
//! let element = FileElement::new(Some(Arc::new(store)), reference);
//!
//! let mut out = String::new();
//! render_file_link(&element, &RenderEnv::new(""), Some(&mut out)).unwrap();
//! assert_eq!(
//!     out,
//!     r#"<a href="/docs/guide.pdf?lastModified=1a2b">guide.pdf</a> (4 bytes)"#
//! );
//! ```

pub mod core;
pub mod logger;
pub mod model;
pub mod openfile;
pub mod render;
pub mod resource;
pub mod utils;

pub use crate::core::{BookRef, ResourcePath, ResourceRef};
pub use model::FileElement;
pub use openfile::{OPEN_FILE_GATE, OpenFileGate, OpenFilePolicy, install_provider};
pub use render::{
    LinkDescriptor, LinkLabel, LinkTarget, RenderEnv, RenderError, ResolvedResource, decide,
    render_file_link, resolve,
};
