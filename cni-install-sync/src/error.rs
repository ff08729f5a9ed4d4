//! Error types for cni-install-sync.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors from a synchronizer run.
///
/// Unwritable target directories and stale temp files that cannot be removed
/// are logged, never returned.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
