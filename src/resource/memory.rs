//! In-memory resource store.
//!
//! Holds resource bytes and metadata in a map. Used for books whose content
//! lives somewhere without local files (remote mirrors, tests). Connections
//! never produce a local file handle, so links to these resources always go
//! through the URL modes.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::core::ResourcePath;

use super::{Resource, ResourceConnection, ResourceStore};

/// One stored resource: content plus its modification time.
#[derive(Debug, Clone)]
struct MemoryEntry {
    data: Arc<[u8]>,
    /// Milliseconds since the epoch, `0` = unknown.
    last_modified: u64,
}

/// Thread-safe in-memory store keyed by resource path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    entries: Arc<RwLock<FxHashMap<ResourcePath, MemoryEntry>>>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Arc::default(),
        }
    }

    /// Insert or replace a resource.
    pub fn insert(
        &self,
        path: impl Into<ResourcePath>,
        data: impl Into<Arc<[u8]>>,
        last_modified: u64,
    ) {
        self.entries.write().insert(
            path.into(),
            MemoryEntry {
                data: data.into(),
                last_modified,
            },
        );
    }

    /// Remove a resource.
    pub fn remove(&self, path: &ResourcePath) {
        self.entries.write().remove(path);
    }
}

impl ResourceStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_resource(&self, path: &ResourcePath) -> Option<Box<dyn Resource>> {
        Some(Box::new(MemoryResource {
            entries: Arc::clone(&self.entries),
            path: path.clone(),
        }))
    }
}

struct MemoryResource {
    entries: Arc<RwLock<FxHashMap<ResourcePath, MemoryEntry>>>,
    path: ResourcePath,
}

impl Resource for MemoryResource {
    fn open(&self) -> io::Result<Box<dyn ResourceConnection>> {
        Ok(Box::new(MemoryConnection {
            entry: self.entries.read().get(&self.path).cloned(),
        }))
    }
}

/// Connection over a snapshot of the entry taken at open time.
struct MemoryConnection {
    entry: Option<MemoryEntry>,
}

impl ResourceConnection for MemoryConnection {
    fn exists(&mut self) -> io::Result<bool> {
        Ok(self.entry.is_some())
    }

    fn last_modified(&mut self) -> io::Result<u64> {
        Ok(self.entry.as_ref().map_or(0, |e| e.last_modified))
    }

    fn length(&mut self) -> io::Result<i64> {
        Ok(self.entry.as_ref().map_or(-1, |e| e.data.len() as i64))
    }

    fn local_file(&mut self) -> io::Result<PathBuf> {
        // No local materialization for in-memory content
        Err(io::Error::from(io::ErrorKind::NotFound))
    }

    fn close(&mut self) {
        self.entry = None;
    }
}
