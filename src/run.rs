//! Application execution logic.
//!
//! This module dispatches a parsed subcommand against the host's interface
//! catalog and settings, writing human-readable text or JSON to stdout.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use netif_catalog::config::{Command, ValidatedConfig};
use netif_catalog::host::{
    DeviceNameResolver, HostError, PropertyReader, SettingsSource, delete_recursively,
    materialize_assets,
};
use netif_catalog::network::filter::FilteredFetcher;
use netif_catalog::network::listen::{listen_options, resolve_bind_addresses};
use netif_catalog::network::platform::PlatformFetcher;
use netif_catalog::network::{InterfaceCatalog, InterfaceFetcher, LookupError, NicFilter};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Interface lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Host setting lookup failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Some entries of an asset tree were not copied.
    #[error("{failures} asset(s) could not be copied")]
    IncompleteCopy {
        /// Number of failed entries
        failures: usize,
    },

    /// Writing output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON encoding failed.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Executes one subcommand against the host.
///
/// # Errors
///
/// Returns an error if a named interface is unknown, a property cannot be
/// read, an asset copy is incomplete, or output cannot be written.
///
/// Excluded from coverage - requires platform APIs.
#[cfg(not(tarpaulin_include))]
pub fn execute(command: &Command, config: ValidatedConfig) -> Result<(), RunError> {
    let fetcher = FilteredFetcher::new(PlatformFetcher::default(), config.interface_filter);
    let session = Session {
        catalog: InterfaceCatalog::new(fetcher),
        settings: PropertyReader::new(config.property_program),
        device: config.device,
        nic_filter: config.nic_filter,
        json: config.json,
    };

    let stdout = io::stdout();
    session.dispatch(command, &mut stdout.lock())
}

/// Everything a subcommand needs, with the host seams injectable.
struct Session<F, S> {
    catalog: InterfaceCatalog<F>,
    settings: S,
    device: DeviceNameResolver,
    nic_filter: NicFilter,
    json: bool,
}

impl<F: InterfaceFetcher, S: SettingsSource> Session<F, S> {
    fn dispatch<W: Write>(&self, command: &Command, out: &mut W) -> Result<(), RunError> {
        match command {
            Command::List { .. } => self.list(out),
            Command::Addrs { interface } => self.addrs(interface, out),
            Command::Options => self.options(out),
            Command::Bind { option_id } => self.bind(option_id, out),
            Command::DeviceName => self.device_name(out),
            Command::Prop { key } => self.prop(key, out),
            Command::CopyAssets { src, out: dest, clean } => {
                self.copy_assets(src, dest, *clean, out)
            }
            // Handled before configuration is loaded
            Command::Init { .. } => Ok(()),
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<(), RunError> {
        let interfaces = self.catalog.list(self.nic_filter);
        if self.json {
            return write_json(out, &interfaces);
        }

        for iface in &interfaces {
            let state = if iface.is_up { "up" } else { "down" };
            let kind = if iface.is_loopback { " loopback" } else { "" };
            let addrs: Vec<String> = iface.addresses.iter().map(ToString::to_string).collect();
            writeln!(out, "{}\t{state}{kind}\t{}", iface.name, addrs.join(" "))?;
        }
        Ok(())
    }

    fn addrs<W: Write>(&self, interface: &str, out: &mut W) -> Result<(), RunError> {
        let addresses = self.catalog.ipv4_addresses_of(interface)?;
        if self.json {
            return write_json(out, &addresses);
        }

        for address in &addresses {
            writeln!(out, "{address}")?;
        }
        Ok(())
    }

    fn options<W: Write>(&self, out: &mut W) -> Result<(), RunError> {
        let options = listen_options(&self.catalog);
        if self.json {
            return write_json(out, &options);
        }

        for option in &options {
            writeln!(out, "{}\t{option}", option.option_id())?;
        }
        Ok(())
    }

    fn bind<W: Write>(&self, option_id: &str, out: &mut W) -> Result<(), RunError> {
        let addresses = resolve_bind_addresses(&self.catalog, option_id);
        if self.json {
            return write_json(out, &addresses);
        }

        for address in &addresses {
            writeln!(out, "{address}")?;
        }
        Ok(())
    }

    fn device_name<W: Write>(&self, out: &mut W) -> Result<(), RunError> {
        let name = self.device.resolve(&self.settings);
        if self.json {
            return write_json(out, &name);
        }

        writeln!(out, "{name}")?;
        Ok(())
    }

    fn prop<W: Write>(&self, key: &str, out: &mut W) -> Result<(), RunError> {
        let value = self.settings.read(key)?;
        if self.json {
            return write_json(out, &value);
        }

        writeln!(out, "{}", value.unwrap_or_default())?;
        Ok(())
    }

    fn copy_assets<W: Write>(
        &self,
        src: &Path,
        dest: &Path,
        clean: bool,
        out: &mut W,
    ) -> Result<(), RunError> {
        if clean {
            delete_recursively(dest);
        }

        let report = materialize_assets(src, dest);
        if self.json {
            write_json(out, &report)?;
        } else {
            writeln!(
                out,
                "Copied {} file(s) into {} ({} directories created)",
                report.files_copied,
                dest.display(),
                report.dirs_created,
            )?;
        }

        if report.is_complete() {
            Ok(())
        } else {
            Err(RunError::IncompleteCopy {
                failures: report.failures,
            })
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
