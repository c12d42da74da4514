//! Error types for bundle-copy

use std::path::PathBuf;
use thiserror::Error;

/// Error types for copy operations
#[derive(Debug, Error)]
pub enum CopyError {
    /// A declared source does not exist at copy time
    #[error("ENOENT: no such file or directory, stat '{}'", .path.display())]
    NotFound { path: PathBuf },

    /// Any other filesystem failure, surfaced unmodified
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// List-form target without a final path segment to name the copy after
    #[error("Invalid target '{}': cannot derive a destination name", .target.display())]
    InvalidTarget { target: PathBuf },

    /// Source and destination resolve to the same path
    #[error("Source and destination must not be the same: '{}'", .path.display())]
    SamePath { path: PathBuf },

    /// Destination lies inside the source directory
    #[error(
        "Cannot copy '{}' to a subdirectory of itself, '{}'",
        .src.display(),
        .dest.display()
    )]
    IntoItself { src: PathBuf, dest: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Blocking copy task panicked or was cancelled
    #[error("Copy task failed: {0}")]
    TaskFailed(String),
}

impl CopyError {
    /// Check if this error reports a missing source
    pub fn is_not_found(&self) -> bool {
        match self {
            CopyError::NotFound { .. } => true,
            CopyError::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error comes from the declaration rather than the filesystem
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CopyError::Config(_) | CopyError::InvalidTarget { .. }
        )
    }
}
