//! Interface enumeration trait and error types.

use super::NetworkInterface;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The catalog degrades these to an empty result; other callers may not.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// OS-level I/O failure (e.g., `getifaddrs` returned an errno).
    #[error("Interface enumeration failed: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied to access network information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// The OS interface-enumeration primitive.
///
/// # Design
///
/// - Platform implementations live in [`super::platform`]
/// - Enables dependency injection of a fake OS for testing
///
/// # Example
///
/// ```ignore
/// use netif_catalog::network::{InterfaceFetcher, NetworkInterface, FetchError};
///
/// struct FixedFetcher(Vec<NetworkInterface>);
///
/// impl InterfaceFetcher for FixedFetcher {
///     fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait InterfaceFetcher: Send + Sync {
    /// Fetches a point-in-time snapshot of all host interfaces.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when:
    /// - Platform API calls fail (`FetchError::Io`, `FetchError::WindowsApi`)
    /// - Insufficient permissions to access network information (`FetchError::PermissionDenied`)
    /// - Other platform-specific failures (`FetchError::Platform`)
    ///
    /// # Implementation Notes
    ///
    /// - Return ALL interfaces in OS enumeration order; filtering is done by the caller
    /// - Each interface name appears at most once
    /// - Address order within each interface must follow the OS report
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError>;
}

impl<T: InterfaceFetcher + ?Sized> InterfaceFetcher for &T {
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
        (**self).fetch()
    }
}

impl<T: InterfaceFetcher + ?Sized> InterfaceFetcher for Box<T> {
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
        (**self).fetch()
    }
}
