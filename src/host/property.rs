//! Shell property reader.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::device::SettingsSource;
use super::error::HostError;

/// Default property query program.
pub const DEFAULT_PROGRAM: &str = "/system/bin/getprop";

/// Runs `<program> <key>` and reports the first line of its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyReader {
    program: PathBuf,
}

impl Default for PropertyReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl PropertyReader {
    /// Creates a reader that runs the given program.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program this reader runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Reads one property.
    ///
    /// Returns the first output line without its terminator. An empty first
    /// line is returned as an empty string.
    ///
    /// # Errors
    ///
    /// - [`HostError::Spawn`] if the program cannot be started
    /// - [`HostError::NoOutput`] if it prints nothing
    pub fn read_property(&self, key: &str) -> Result<String, HostError> {
        let output = Command::new(&self.program)
            .arg(key)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| HostError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let line = first_line(&output.stdout).ok_or_else(|| HostError::NoOutput {
            program: self.program.display().to_string(),
            key: key.to_string(),
        })?;

        tracing::debug!(key, value = %line, "Read property");
        Ok(line)
    }
}

impl SettingsSource for PropertyReader {
    fn read(&self, key: &str) -> Result<Option<String>, HostError> {
        match self.read_property(key) {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(HostError::NoOutput { .. }) => Ok(None),
            Err(HostError::Spawn { source, .. }) if source.kind() == ErrorKind::PermissionDenied => {
                Err(HostError::PermissionDenied {
                    key: key.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn first_line(stdout: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .next()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_takes_only_the_first() {
        assert_eq!(first_line(b"Pixel 7\nsecond\n").as_deref(), Some("Pixel 7"));
        assert_eq!(first_line(b"no newline").as_deref(), Some("no newline"));
        assert_eq!(first_line(b"crlf\r\nnext").as_deref(), Some("crlf"));
    }

    #[test]
    fn first_line_of_blank_line_is_empty() {
        assert_eq!(first_line(b"\n").as_deref(), Some(""));
    }

    #[test]
    fn first_line_of_nothing_is_none() {
        assert_eq!(first_line(b""), None);
    }

    #[test]
    fn default_program_is_getprop() {
        assert_eq!(PropertyReader::default().program(), Path::new(DEFAULT_PROGRAM));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let reader = PropertyReader::new("/nonexistent/definitely-not-here");

        let err = reader.read_property("ro.product.model").unwrap_err();

        assert!(matches!(err, HostError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-here"));
    }

    #[cfg(unix)]
    #[test]
    fn echo_returns_key_as_first_line() {
        let reader = PropertyReader::new("echo");

        assert_eq!(reader.read_property("ro.product.model").unwrap(), "ro.product.model");
        assert_eq!(
            reader.read("persist.sys.name").unwrap().as_deref(),
            Some("persist.sys.name")
        );
    }

    #[cfg(unix)]
    #[test]
    fn silent_program_reads_as_absent_setting() {
        let reader = PropertyReader::new("true");

        assert!(matches!(
            reader.read_property("anything"),
            Err(HostError::NoOutput { .. })
        ));
        assert_eq!(reader.read("anything").unwrap(), None);
    }
}
