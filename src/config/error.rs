//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid regex pattern for interface filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A value that must not be blank was blank.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `InvalidValue` errors.
pub mod field {
    /// The device fallback label.
    pub const FALLBACK_LABEL: &str = "device.fallback_label";
    /// The primary device name key.
    pub const PRIMARY_KEY: &str = "device.primary_key";
    /// The secondary device name key.
    pub const SECONDARY_KEY: &str = "device.secondary_key";
    /// The property program.
    pub const PROPERTY_PROGRAM: &str = "property.program";
}

impl ConfigError {
    /// Creates an `InvalidValue` error for a blank field.
    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self::InvalidValue {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}
