//! Configuration layer for netif-catalog.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file** (`--config`, else the per-user file if present)
//! 3. **Built-in defaults**
//!
//! Interface exclude patterns from the CLI **replace** TOML patterns entirely.
//!
//! # Boolean Flag Semantics
//!
//! `--up` and `--exclude-loopback` only enable: `true` in either CLI or TOML
//! wins. `--all-families` disables `catalog.require_ipv4` regardless of TOML.
//!
//! Device name keys and the fallback label are TOML-only.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, expand_tilde, write_default_config};
