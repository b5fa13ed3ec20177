//! Resource connector: from reference to resolved local state.
//!
//! Resolution answers three questions before any link decision is made:
//! does the resource exist (via a live connection), is there a direct local
//! file handle for it, and is it a directory. The connection opened here is
//! owned by the returned [`ResolvedResource`] and closed exactly once when
//! that value drops.

use std::io;
use std::path::PathBuf;

use crate::core::ResourceRef;
use crate::debug;
use crate::resource::{ConnectionGuard, ResourceStore};

use super::error::RenderError;

/// Findings of the resource connector for one reference.
#[derive(Debug)]
pub struct ResolvedResource {
    /// Live connection, when a store served the reference.
    pub connection: Option<ConnectionGuard>,
    /// Direct local filesystem handle, when one could be materialized.
    pub local_file: Option<PathBuf>,
    /// From filesystem attributes when a local file exists, otherwise
    /// inferred from the trailing-separator convention.
    pub is_directory: bool,
}

/// Resolve a reference against its book's store.
///
/// `store` is `None` when the referencing book is inaccessible; directory
/// state then comes purely from the path string. The exists-then-vanished
/// race on local file retrieval degrades to "no local file" instead of
/// failing. A local file whose directory-ness disagrees with the reference's
/// trailing-separator convention is a configuration error.
pub fn resolve(
    store: Option<&dyn ResourceStore>,
    reference: &ResourceRef,
) -> Result<ResolvedResource, RenderError> {
    let resource = store.and_then(|s| s.get_resource(reference.path()));
    let mut connection = match resource {
        Some(resource) => Some(ConnectionGuard::new(resource.open()?)),
        None => None,
    };

    let mut local_file = None;
    if let Some(conn) = connection.as_mut()
        && conn.exists()?
    {
        match conn.local_file() {
            Ok(file) => local_file = Some(file),
            // Resource removed between exists() and local_file()
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("resolve"; "local file vanished after existence check: {reference}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let is_directory = match &local_file {
        // Not locally available: trust the trailing-separator convention
        None => reference.path().is_directory_path(),
        Some(file) => {
            let is_dir = file.is_dir();
            if is_dir && !reference.path().is_directory_path() {
                return Err(RenderError::DirectoryMismatch(reference.clone()));
            }
            if !is_dir && reference.path().is_directory_path() {
                return Err(RenderError::NotADirectory(reference.clone()));
            }
            is_dir
        }
    };

    Ok(ResolvedResource {
        connection,
        local_file,
        is_directory,
    })
}
