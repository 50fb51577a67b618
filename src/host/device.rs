//! Device identity resolution.
//!
//! A device name is looked up under a primary setting key. When the primary
//! key may not be read, a secondary key is tried. A static label is the last
//! resort, so resolution never fails.

use super::error::HostError;

/// A key-value store of OS settings.
pub trait SettingsSource {
    /// Reads one setting; `Ok(None)` when the key is unset.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::PermissionDenied`] when the key exists but may not
    /// be read, or another [`HostError`] if the store cannot be queried.
    fn read(&self, key: &str) -> Result<Option<String>, HostError>;
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn read(&self, key: &str) -> Result<Option<String>, HostError> {
        (**self).read(key)
    }
}

/// Resolves a human-readable device name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNameResolver {
    /// Key tried first.
    pub primary_key: String,
    /// Key tried when the primary key is not readable.
    pub secondary_key: String,
    /// Label used when neither key yields a name.
    pub fallback_label: String,
}

impl DeviceNameResolver {
    /// Creates a resolver.
    #[must_use]
    pub fn new(
        primary_key: impl Into<String>,
        secondary_key: impl Into<String>,
        fallback_label: impl Into<String>,
    ) -> Self {
        Self {
            primary_key: primary_key.into(),
            secondary_key: secondary_key.into(),
            fallback_label: fallback_label.into(),
        }
    }

    /// Resolves the device name from `source`.
    #[must_use]
    pub fn resolve<S: SettingsSource + ?Sized>(&self, source: &S) -> String {
        match source.read(&self.primary_key) {
            Ok(Some(name)) if !name.trim().is_empty() => return name,
            Ok(_) => {
                tracing::debug!(key = %self.primary_key, "Device name unset");
            }
            Err(e) if e.is_permission_denied() => {
                tracing::debug!("{e}; trying '{}'", self.secondary_key);
                match source.read(&self.secondary_key) {
                    Ok(Some(name)) if !name.trim().is_empty() => return name,
                    Ok(_) => tracing::debug!(key = %self.secondary_key, "Device name unset"),
                    Err(e) => tracing::debug!("Secondary device name lookup failed: {e}"),
                }
            }
            Err(e) => {
                tracing::debug!("Device name lookup failed: {e}");
            }
        }

        self.fallback_label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory settings; keys listed in `denied` fail with `PermissionDenied`.
    #[derive(Default)]
    struct MapSettings {
        values: HashMap<String, String>,
        denied: Vec<String>,
        broken: bool,
    }

    impl MapSettings {
        fn with(mut self, key: &str, value: &str) -> Self {
            self.values.insert(key.to_string(), value.to_string());
            self
        }

        fn deny(mut self, key: &str) -> Self {
            self.denied.push(key.to_string());
            self
        }
    }

    impl SettingsSource for MapSettings {
        fn read(&self, key: &str) -> Result<Option<String>, HostError> {
            if self.broken {
                return Err(HostError::NoOutput {
                    program: "settings".to_string(),
                    key: key.to_string(),
                });
            }
            if self.denied.iter().any(|k| k == key) {
                return Err(HostError::PermissionDenied {
                    key: key.to_string(),
                });
            }
            Ok(self.values.get(key).cloned())
        }
    }

    fn resolver() -> DeviceNameResolver {
        DeviceNameResolver::new("bluetooth_name", "device_name", "Remote Display")
    }

    #[test]
    fn primary_value_wins() {
        let settings = MapSettings::default()
            .with("bluetooth_name", "Kitchen Tablet")
            .with("device_name", "Other");

        assert_eq!(resolver().resolve(&settings), "Kitchen Tablet");
    }

    #[test]
    fn permission_denied_on_primary_uses_secondary() {
        let settings = MapSettings::default()
            .with("bluetooth_name", "hidden")
            .with("device_name", "Living Room TV")
            .deny("bluetooth_name");

        assert_eq!(resolver().resolve(&settings), "Living Room TV");
    }

    #[test]
    fn both_denied_uses_label() {
        let settings = MapSettings::default()
            .deny("bluetooth_name")
            .deny("device_name");

        assert_eq!(resolver().resolve(&settings), "Remote Display");
    }

    #[test]
    fn denied_primary_and_unset_secondary_uses_label() {
        let settings = MapSettings::default().deny("bluetooth_name");

        assert_eq!(resolver().resolve(&settings), "Remote Display");
    }

    #[test]
    fn unset_primary_does_not_consult_secondary() {
        let settings = MapSettings::default().with("device_name", "Other");

        assert_eq!(resolver().resolve(&settings), "Remote Display");
    }

    #[test]
    fn blank_primary_uses_label() {
        let settings = MapSettings::default().with("bluetooth_name", "   ");

        assert_eq!(resolver().resolve(&settings), "Remote Display");
    }

    #[test]
    fn broken_source_uses_label() {
        let settings = MapSettings {
            broken: true,
            ..MapSettings::default()
        };

        assert_eq!(resolver().resolve(&settings), "Remote Display");
    }

    #[test]
    fn works_through_references_and_trait_objects() {
        let settings = MapSettings::default().with("bluetooth_name", "Desk");
        let dynamic: &dyn SettingsSource = &settings;

        assert_eq!(resolver().resolve(dynamic), "Desk");
        assert_eq!(resolver().resolve(&&settings), "Desk");
    }
}
