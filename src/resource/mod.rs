//! Resource abstraction: stores, resources, and scoped connections.
//!
//! A [`ResourceStore`] provides the resources of one book. Looking a path up
//! yields a [`Resource`], which may or may not exist; opening it yields a
//! live [`ResourceConnection`] that answers existence, last-modified, length,
//! and local-file queries. Connections are always used through a
//! [`ConnectionGuard`] so they are closed exactly once on every exit path.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;

use crate::core::ResourcePath;

// ============================================================================
// Collaborator Traits
// ============================================================================

/// A named provider of resources for one book.
pub trait ResourceStore: Send + Sync {
    /// Human-readable store name, for logs and error messages.
    fn name(&self) -> &str;

    /// Look up a resource by its virtual path.
    ///
    /// Returns `None` when the store cannot address the path at all (for
    /// example a path escaping the store root). A resource that merely does
    /// not exist is still returned; existence is answered by its connection.
    fn get_resource(&self, path: &ResourcePath) -> Option<Box<dyn Resource>>;
}

/// The result of looking up a path in a store. May not exist.
pub trait Resource: Send {
    /// Open a live connection to the resource.
    fn open(&self) -> io::Result<Box<dyn ResourceConnection>>;
}

/// A live handle to a resource.
///
/// Lifecycle: created by [`Resource::open`], queried zero or more times,
/// closed exactly once by the consumer. Wrap in a [`ConnectionGuard`] to get
/// the close-on-all-paths guarantee.
pub trait ResourceConnection: Send {
    /// Whether the resource exists right now.
    fn exists(&mut self) -> io::Result<bool>;

    /// Last modification time in milliseconds since the epoch.
    /// `0` means unknown or unsupported.
    fn last_modified(&mut self) -> io::Result<u64>;

    /// Resource length in bytes. `-1` means unknown.
    fn length(&mut self) -> io::Result<i64>;

    /// Direct local filesystem handle for the resource.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] when the underlying file
    /// vanished between an existence check and this call, or when the store
    /// has no local materialization at all.
    fn local_file(&mut self) -> io::Result<PathBuf>;

    /// Release the connection. Called exactly once, by the guard.
    fn close(&mut self);
}

// ============================================================================
// Connection Guard
// ============================================================================

/// Scoped owner of an open connection.
///
/// Delegates queries to the inner connection and closes it on drop, so the
/// connection is released exactly once no matter how the render exits.
pub struct ConnectionGuard {
    conn: Box<dyn ResourceConnection>,
}

impl ConnectionGuard {
    pub fn new(conn: Box<dyn ResourceConnection>) -> Self {
        Self { conn }
    }

    pub fn exists(&mut self) -> io::Result<bool> {
        self.conn.exists()
    }

    pub fn last_modified(&mut self) -> io::Result<u64> {
        self.conn.last_modified()
    }

    pub fn length(&mut self) -> io::Result<i64> {
        self.conn.length()
    }

    pub fn local_file(&mut self) -> io::Result<PathBuf> {
        self.conn.local_file()
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.conn.close();
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Connection fake that counts close calls.
    struct CountingConnection {
        closes: Arc<AtomicUsize>,
    }

    impl ResourceConnection for CountingConnection {
        fn exists(&mut self) -> io::Result<bool> {
            Ok(true)
        }

        fn last_modified(&mut self) -> io::Result<u64> {
            Ok(0)
        }

        fn length(&mut self) -> io::Result<i64> {
            Ok(-1)
        }

        fn local_file(&mut self) -> io::Result<PathBuf> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_closes_exactly_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let mut guard = ConnectionGuard::new(Box::new(CountingConnection {
                closes: Arc::clone(&closes),
            }));
            assert!(guard.exists().unwrap());
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_closes_on_early_error_return() {
        fn failing_render(guard: &mut ConnectionGuard) -> io::Result<()> {
            guard.local_file()?;
            unreachable!("local_file fails in this fake");
        }

        let closes = Arc::new(AtomicUsize::new(0));
        {
            let mut guard = ConnectionGuard::new(Box::new(CountingConnection {
                closes: Arc::clone(&closes),
            }));
            assert!(failing_render(&mut guard).is_err());
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
