//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::host::DeviceNameResolver;
use crate::network::NicFilter;
use crate::network::filter::{FilterChain, LoopbackFilter, NameRegexFilter};

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Filter applied by `list`
    pub nic_filter: NicFilter,

    /// Interfaces hidden from every command
    pub interface_filter: FilterChain,

    /// Device name lookup
    pub device: DeviceNameResolver,

    /// Property query program
    pub property_program: PathBuf,

    /// JSON output
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ require_up: {}, require_ipv4: {}, hidden: {}, device_keys: {}/{}, \
             fallback_label: {:?}, property_program: {}, json: {} }}",
            self.nic_filter.require_up,
            self.nic_filter.require_ipv4,
            self.interface_filter.exclude_count(),
            self.device.primary_key,
            self.device.secondary_key,
            self.device.fallback_label,
            self.property_program.display(),
            self.json,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Regex patterns are invalid
    /// - Device keys, the fallback label, or the property program are blank
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let nic_filter = Self::resolve_nic_filter(cli, toml);
        let interface_filter = Self::build_interface_filter(cli, toml)?;
        let device = Self::resolve_device(toml)?;
        let property_program = Self::resolve_property_program(cli, toml)?;

        Ok(Self {
            nic_filter,
            interface_filter,
            device,
            property_program,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and an optional config file.
    ///
    /// Uses `cli.config` if set; otherwise the per-user config file when it
    /// exists; otherwise built-in defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .as_deref()
            .map(expand_tilde)
            .or_else(|| defaults::user_config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Some(TomlConfig::load(&path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_nic_filter(cli: &Cli, toml: Option<&TomlConfig>) -> NicFilter {
        let (cli_up, cli_all_families) = match cli.command {
            Command::List { up, all_families } => (up, all_families),
            _ => (false, false),
        };

        // Flags only enable: OR with TOML
        let require_up =
            cli_up || toml.is_some_and(|t| t.catalog.require_up) || defaults::REQUIRE_UP;

        let require_ipv4 = if cli_all_families {
            false
        } else {
            toml.and_then(|t| t.catalog.require_ipv4)
                .unwrap_or(defaults::REQUIRE_IPV4)
        };

        NicFilter::new(require_up, require_ipv4)
    }

    fn build_interface_filter(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<FilterChain, ConfigError> {
        let mut chain = FilterChain::new();

        // CLI patterns replace TOML patterns entirely
        let patterns: &[String] = if cli.exclude_interfaces.is_empty() {
            toml.map(|t| t.interfaces.exclude.as_slice())
                .unwrap_or_default()
        } else {
            &cli.exclude_interfaces
        };

        for pattern in patterns {
            let filter = NameRegexFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
                pattern: pattern.clone(),
                source: e,
            })?;
            chain = chain.exclude(filter);
        }

        if cli.exclude_loopback || toml.is_some_and(|t| t.interfaces.exclude_loopback) {
            chain = chain.exclude(LoopbackFilter);
        }

        Ok(chain)
    }

    fn resolve_device(toml: Option<&TomlConfig>) -> Result<DeviceNameResolver, ConfigError> {
        let section = toml.map(|t| &t.device);

        let primary = section
            .and_then(|d| d.primary_key.as_deref())
            .unwrap_or(defaults::DEVICE_PRIMARY_KEY);
        let secondary = section
            .and_then(|d| d.secondary_key.as_deref())
            .unwrap_or(defaults::DEVICE_SECONDARY_KEY);
        let label = section
            .and_then(|d| d.fallback_label.as_deref())
            .unwrap_or(defaults::DEVICE_FALLBACK_LABEL);

        non_blank(primary, field::PRIMARY_KEY)?;
        non_blank(secondary, field::SECONDARY_KEY)?;
        non_blank(label, field::FALLBACK_LABEL)?;

        Ok(DeviceNameResolver::new(primary, secondary, label))
    }

    fn resolve_property_program(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<PathBuf, ConfigError> {
        let program = cli
            .property_program
            .as_deref()
            .or_else(|| toml.and_then(|t| t.property.program.as_deref()))
            .unwrap_or_else(|| Path::new(defaults::PROPERTY_PROGRAM));

        if program.as_os_str().is_empty() {
            return Err(ConfigError::blank(field::PROPERTY_PROGRAM));
        }

        Ok(expand_tilde(program))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn non_blank(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::blank(field));
    }
    Ok(())
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
