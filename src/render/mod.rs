//! File reference rendering: resolve, decide, bind.
//!
//! [`render_file_link`] is the single produced operation: it resolves the
//! element's resource, derives the link descriptor, and hands it to the HTML
//! binding. With no output sink it runs in validation-only mode, which still
//! opens and closes the connection and enforces the directory invariant.

pub mod decide;
pub mod error;
pub mod html;
pub mod resolve;

pub use decide::{
    LAST_MODIFIED_DISABLE_VALUE, LAST_MODIFIED_PARAM, LinkClassResolver, LinkDescriptor,
    LinkLabel, LinkTarget, RefIdResolver, RenderEnv, UrlRewriter, decide, encode_last_modified,
    encode_uri,
};
pub use error::RenderError;
pub use html::write_link;
pub use resolve::{ResolvedResource, resolve};

use std::fmt;

use crate::model::FileElement;

/// Render a file reference element as a hyperlink.
///
/// When `out` is `None` the call performs validation only: the resource is
/// resolved, the directory/suffix invariant checked, and the connection
/// opened and closed, without emitting anything.
///
/// The connection is released exactly once on every exit path, including
/// configuration errors and I/O failures.
pub fn render_file_link(
    element: &FileElement,
    env: &RenderEnv<'_>,
    out: Option<&mut dyn fmt::Write>,
) -> Result<(), RenderError> {
    let Some((store, reference)) = element.resource() else {
        return Err(RenderError::ResourceNotBound(element.to_string()));
    };
    let mut resolved = resolve(store, reference)?;
    if let Some(out) = out {
        let descriptor = decide(element, &mut resolved, env)?;
        write_link(out, &descriptor)?;
    }
    Ok(())
}
