//! Error types for host collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for host lookups and file operations.
#[derive(Debug, Error)]
pub enum HostError {
    /// File system operation failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to start the property command.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that could not be started
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The property command produced no output line.
    #[error("'{program} {key}' produced no output")]
    NoOutput {
        /// Program that was run
        program: String,
        /// Property key that was queried
        key: String,
    },

    /// The setting exists but may not be read by this process.
    #[error("Permission denied reading setting '{key}'")]
    PermissionDenied {
        /// Setting key
        key: String,
    },
}

impl HostError {
    /// Returns true if this is a permission failure.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
