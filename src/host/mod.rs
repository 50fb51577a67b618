//! Host helpers used around the discovery core.
//!
//! - Device identity ([`DeviceNameResolver`], [`SettingsSource`])
//! - Shell property lookups ([`PropertyReader`])
//! - Bundled asset copying and cleanup ([`materialize_assets`], [`delete_recursively`])

mod device;
mod error;
mod fs;
mod property;

pub use device::{DeviceNameResolver, SettingsSource};
pub use error::HostError;
pub use fs::{CopyReport, delete_recursively, materialize_assets};
pub use property::{DEFAULT_PROGRAM, PropertyReader};
