//! Error types for assetsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use assetsync_core::error::RegistryError;

/// Errors that abort a sync operation or fail a single file step.
///
/// Only [`SyncError::Registry`] escapes the pipeline; per-file I/O errors are
/// folded into the phase error lists of a `PublishOutcome`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the component registry.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

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
