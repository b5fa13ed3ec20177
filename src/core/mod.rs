//! Core types - pure abstractions shared across the codebase.

mod path;
mod reference;

pub use path::{ResourcePath, SEPARATOR, SEPARATOR_STR};
pub use reference::{BookRef, ResourceRef};
