//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Catalog filter defaults
    #[serde(default)]
    pub catalog: CatalogSection,

    /// Interface hiding
    #[serde(default)]
    pub interfaces: InterfacesSection,

    /// Device name lookup
    #[serde(default)]
    pub device: DeviceSection,

    /// Property reader
    #[serde(default)]
    pub property: PropertySection,
}

/// Catalog filter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Request the liveness stage
    #[serde(default)]
    pub require_up: bool,

    /// Keep only interfaces with an IPv4 address (default: true)
    pub require_ipv4: Option<bool>,
}

/// Interface hiding section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfacesSection {
    /// Regex patterns for interfaces to hide
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Hide loopback interfaces
    #[serde(default)]
    pub exclude_loopback: bool,
}

/// Device name section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSection {
    /// Setting key read first
    pub primary_key: Option<String>,

    /// Setting key read when the primary is not readable
    pub secondary_key: Option<String>,

    /// Label used when no name can be read
    pub fallback_label: Option<String>,
}

/// Property reader section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySection {
    /// Program run as `<program> <key>`
    pub program: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# netif-catalog configuration file

[catalog]
# Request the liveness stage for `list` (CLI: --up)
# Note: down interfaces are still listed; use `options` for up-only results.
# require_up = false

# Keep only interfaces with an IPv4 address (CLI: --all-families disables)
# require_ipv4 = true

[interfaces]
# Regex patterns for interfaces to hide from every command
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth"]

# Hide loopback interfaces
# exclude_loopback = false

[device]
# Setting key read first for the device name
# primary_key = "bluetooth_name"

# Setting key read when the primary key is not readable
# secondary_key = "device_name"

# Label used when no device name can be read
# fallback_label = "Remote Display"

[property]
# Program run as `<program> <key>` to read device properties
# program = "/system/bin/getprop"
"#
    .to_string()
}
