//! Platform-specific interface fetcher implementations.
//!
//! # Platform Support
//!
//! - **Unix** (Linux, Android, macOS, BSD): `getifaddrs` via the `nix` crate.
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher;

// Re-export platform-specific fetcher as PlatformFetcher for convenience
#[cfg(unix)]
pub use unix::UnixFetcher as PlatformFetcher;
#[cfg(windows)]
pub use windows::WindowsFetcher as PlatformFetcher;
