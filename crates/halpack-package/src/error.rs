//! Packaging errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the package layout.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Filesystem failure, tagged with the offending path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata serialization failure.
    #[error("metadata serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PackageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
