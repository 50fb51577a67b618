//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default liveness stage switch for `list`.
pub const REQUIRE_UP: bool = false;

/// Default IPv4-availability stage switch for `list`.
pub const REQUIRE_IPV4: bool = true;

/// Setting key read first for the device name.
pub const DEVICE_PRIMARY_KEY: &str = "bluetooth_name";

/// Setting key read when the primary key is not readable.
pub const DEVICE_SECONDARY_KEY: &str = "device_name";

/// Label used when no device name can be read.
pub const DEVICE_FALLBACK_LABEL: &str = "Remote Display";

/// Property query program.
pub const PROPERTY_PROGRAM: &str = crate::host::DEFAULT_PROGRAM;

/// File name of the per-user configuration file.
pub const CONFIG_FILE_NAME: &str = "netif-catalog.toml";

/// Per-user configuration file location, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
