//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// netif-catalog: network interface discovery for remote-display servers
///
/// Lists usable interfaces and IPv4 addresses, resolves where to bind,
/// and exposes the small host helpers the server needs.
#[derive(Debug, Parser)]
#[command(name = "netif-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Regex pattern for interfaces to hide (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN", global = true)]
    pub exclude_interfaces: Vec<String>,

    /// Hide loopback interfaces
    #[arg(long = "exclude-loopback", global = true)]
    pub exclude_loopback: bool,

    /// Property query program
    #[arg(long = "property-program", value_name = "PATH", global = true)]
    pub property_program: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for netif-catalog
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List interfaces
    List {
        /// Accepted for compatibility; liveness is not checked
        #[arg(long)]
        up: bool,

        /// Include interfaces without an IPv4 address
        #[arg(long = "all-families")]
        all_families: bool,
    },

    /// Print the IPv4 addresses of one interface
    Addrs {
        /// Interface name
        interface: String,
    },

    /// List the places the server can listen on
    Options,

    /// Resolve a listen option id to bind addresses
    Bind {
        /// Option id ("0.0.0.0" or an interface name)
        option_id: String,
    },

    /// Print the device name
    DeviceName,

    /// Read one device property
    Prop {
        /// Property key
        key: String,
    },

    /// Copy a resource tree into a writable directory
    CopyAssets {
        /// Source directory
        src: PathBuf,

        /// Output directory
        out: PathBuf,

        /// Delete the output directory first
        #[arg(long)]
        clean: bool,
    },

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netif-catalog.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap errors.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
