//! Render error taxonomy.
//!
//! Configuration errors abort the current render and signal immediately;
//! I/O errors propagate unchanged from the store or filesystem. The one
//! tolerated race (resource vanishing between existence check and local file
//! retrieval) never surfaces here.

use thiserror::Error;

use crate::core::ResourceRef;

/// Errors from resolving a file reference or deriving its link.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Element rendered without a resource binding.
    #[error("resource not set on file element: {0}")]
    ResourceNotBound(String),

    /// Local resource is a directory but the reference path has no trailing
    /// slash.
    #[error("references to directories must end in slash (/): {0}")]
    DirectoryMismatch(ResourceRef),

    /// Reference path has a trailing slash but the local resource is not a
    /// directory.
    #[error("reference ends in slash (/) but resource is not a directory: {0}")]
    NotADirectory(ResourceRef),

    /// Reference has no meaningful terminal segment to use as a filename.
    #[error("invalid filename for file: {0}")]
    EmptyFilename(String),

    /// Store lookup, connection, or filesystem failure. Never retried.
    #[error("I/O error accessing resource")]
    Io(#[from] std::io::Error),

    /// Output sink rejected a write.
    #[error("failed writing link output")]
    Write(#[from] std::fmt::Error),
}

impl RenderError {
    /// Whether this is a configuration/data error (caller mistake) rather
    /// than an environmental failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotBound(_)
                | Self::DirectoryMismatch(_)
                | Self::NotADirectory(_)
                | Self::EmptyFilename(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BookRef;

    #[test]
    fn test_configuration_classification() {
        let rref = ResourceRef::new(BookRef::new("d", "/b"), "/x");
        assert!(RenderError::DirectoryMismatch(rref).is_configuration());
        assert!(RenderError::EmptyFilename("/".into()).is_configuration());
        assert!(!RenderError::Io(std::io::Error::other("boom")).is_configuration());
    }

    #[test]
    fn test_display_mentions_reference() {
        let rref = ResourceRef::new(BookRef::new("example.com", "/docs"), "/dir");
        let message = RenderError::DirectoryMismatch(rref).to_string();
        assert!(message.contains("example.com:/docs!/dir"));
    }
}
