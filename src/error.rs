//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for blocking operations.
pub type Result<T> = std::result::Result<T, DblockError>;

/// Errors returned by blocking operations.
#[derive(Debug, Error)]
pub enum DblockError {
    /// Filesystem I/O failed on the hosts file, the backup file, or one of
    /// the per-user state directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The current process may not write to the target file.
    #[error("insufficient permissions to modify {path}")]
    Permission {
        /// The file that failed the write-access check.
        path: PathBuf,
    },

    /// The configuration document could not be parsed or serialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The per-user state directory could not be resolved.
    #[error("could not determine the home directory")]
    NoHomeDir,
}

impl DblockError {
    /// Returns `true` if the error denotes missing write privilege, either
    /// from the explicit precheck or from the underlying I/O layer.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Permission { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            Self::Config(_) | Self::NoHomeDir => false,
        }
    }
}
