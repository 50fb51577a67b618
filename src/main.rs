//! netif-catalog: Network Interface & Address Discovery
//!
//! Entry point for the netif-catalog binary.

use std::path::Path;
use std::process::ExitCode;

use netif_catalog::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // `init` runs before any config file is read
    if let Command::Init { output } = &cli.command {
        return write_template(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    if let Err(e) = run::execute(&cli.command, config) {
        eprintln!("Error: {e}");
        return exit_code::runtime_error();
    }
    exit_code::SUCCESS
}

/// Writes the commented configuration template for `init`.
fn write_template(output: &Path) -> ExitCode {
    if let Err(e) = write_default_config(output) {
        eprintln!("Error: {e}");
        return exit_code::CONFIG_ERROR;
    }

    println!("Configuration template written to: {}", output.display());
    exit_code::SUCCESS
}
