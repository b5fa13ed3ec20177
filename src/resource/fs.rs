//! Filesystem-backed resource store.
//!
//! Maps virtual paths directly onto a root directory. This is the store used
//! for locally accessible books; its connections hand out real local file
//! handles so desktop open integration can kick in.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::core::{ResourcePath, SEPARATOR};

use super::{Resource, ResourceConnection, ResourceStore};

/// Store serving resources straight from a directory tree.
#[derive(Debug, Clone)]
pub struct FsStore {
    name: String,
    root: PathBuf,
}

impl FsStore {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceStore for FsStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_resource(&self, path: &ResourcePath) -> Option<Box<dyn Resource>> {
        // Reject traversal out of the store root
        if path.as_str().split(SEPARATOR).any(|seg| seg == "..") {
            return None;
        }
        let relative = path.as_str().trim_start_matches(SEPARATOR);
        Some(Box::new(FsResource {
            fs_path: self.root.join(relative),
        }))
    }
}

struct FsResource {
    fs_path: PathBuf,
}

impl Resource for FsResource {
    fn open(&self) -> io::Result<Box<dyn ResourceConnection>> {
        Ok(Box::new(FsConnection {
            fs_path: self.fs_path.clone(),
        }))
    }
}

struct FsConnection {
    fs_path: PathBuf,
}

impl FsConnection {
    fn metadata(&self) -> io::Result<Option<fs::Metadata>> {
        match fs::metadata(&self.fs_path) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl ResourceConnection for FsConnection {
    fn exists(&mut self) -> io::Result<bool> {
        Ok(self.metadata()?.is_some())
    }

    fn last_modified(&mut self) -> io::Result<u64> {
        let Some(meta) = self.metadata()? else {
            return Ok(0);
        };
        // Platforms without mtime support report "unknown"
        let millis = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_millis() as u64);
        Ok(millis)
    }

    fn length(&mut self) -> io::Result<i64> {
        match self.metadata()? {
            Some(meta) if meta.is_file() => Ok(meta.len() as i64),
            _ => Ok(-1),
        }
    }

    fn local_file(&mut self) -> io::Result<PathBuf> {
        if self.metadata()?.is_none() {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        Ok(self.fs_path.clone())
    }

    fn close(&mut self) {
        // Stat-based connection holds no OS handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> FsStore {
        FsStore::new("test", dir)
    }

    #[test]
    fn test_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let store = store(dir.path());
        let resource = store.get_resource(&ResourcePath::new("/a.txt")).unwrap();
        let mut conn = resource.open().unwrap();

        assert!(conn.exists().unwrap());
        assert_eq!(conn.length().unwrap(), 5);
        assert!(conn.last_modified().unwrap() > 0);
        assert_eq!(conn.local_file().unwrap(), dir.path().join("a.txt"));
        conn.close();
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let resource = store.get_resource(&ResourcePath::new("/gone.txt")).unwrap();
        let mut conn = resource.open().unwrap();

        assert!(!conn.exists().unwrap());
        assert_eq!(conn.last_modified().unwrap(), 0);
        assert_eq!(conn.length().unwrap(), -1);
        let err = conn.local_file().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        conn.close();
    }

    #[test]
    fn test_directory_length_unknown() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let store = store(dir.path());
        let resource = store.get_resource(&ResourcePath::new("/sub/")).unwrap();
        let mut conn = resource.open().unwrap();

        assert!(conn.exists().unwrap());
        assert_eq!(conn.length().unwrap(), -1);
        assert!(conn.local_file().unwrap().is_dir());
        conn.close();
    }

    #[test]
    fn test_traversal_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        assert!(store.get_resource(&ResourcePath::new("/../etc/passwd")).is_none());
    }
}
