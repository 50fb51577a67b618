//! Interface name filtering for hiding interfaces from the catalog.
//!
//! # Design
//!
//! - **Pure Matchers**: [`LoopbackFilter`] and [`NameRegexFilter`] only answer
//!   "does this interface match?" and leave hiding to the chain.
//! - **Filter Chain**: [`FilterChain`] rejects an interface matched by any
//!   of its exclude filters; an empty chain keeps everything.
//! - **Decorator**: [`FilteredFetcher`] applies filtering transparently
//!   to any [`InterfaceFetcher`], so the catalog never sees hidden interfaces.

use regex::Regex;

use super::{FetchError, InterfaceFetcher, NetworkInterface};

/// Trait for matching network interfaces.
///
/// Filters must be `Send + Sync` so a filtered fetcher stays `Send + Sync`.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface matches.
    fn matches(&self, iface: &NetworkInterface) -> bool;
}

/// Matches interfaces the OS flags as loopback.
///
/// # Examples
///
/// ```
/// use netif_catalog::network::filter::{InterfaceFilter, LoopbackFilter};
/// use netif_catalog::network::NetworkInterface;
///
/// let lo = NetworkInterface::new("lo", true, vec![]).loopback();
/// let eth0 = NetworkInterface::new("eth0", true, vec![]);
///
/// assert!(LoopbackFilter.matches(&lo));
/// assert!(!LoopbackFilter.matches(&eth0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackFilter;

impl InterfaceFilter for LoopbackFilter {
    fn matches(&self, iface: &NetworkInterface) -> bool {
        iface.is_loopback
    }
}

/// Matches interfaces whose name matches a regex.
///
/// # Examples
///
/// ```
/// use netif_catalog::network::filter::{InterfaceFilter, NameRegexFilter};
/// use netif_catalog::network::NetworkInterface;
///
/// let filter = NameRegexFilter::new(r"^docker").unwrap();
///
/// assert!(filter.matches(&NetworkInterface::new("docker0", true, vec![])));
/// assert!(!filter.matches(&NetworkInterface::new("eth0", true, vec![])));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, iface: &NetworkInterface) -> bool {
        self.pattern.is_match(&iface.name)
    }
}

/// Filter chain with exclude-any semantics.
///
/// An interface matches the chain unless one of its exclude filters matches.
///
/// # Examples
///
/// ```
/// use netif_catalog::network::filter::{FilterChain, InterfaceFilter, LoopbackFilter, NameRegexFilter};
/// use netif_catalog::network::NetworkInterface;
///
/// let chain = FilterChain::new()
///     .exclude(LoopbackFilter)
///     .exclude(NameRegexFilter::new("^veth").unwrap());
///
/// assert!(chain.matches(&NetworkInterface::new("wlan0", true, vec![])));
/// assert!(!chain.matches(&NetworkInterface::new("veth12ab", true, vec![])));
/// assert!(!chain.matches(&NetworkInterface::new("lo", true, vec![]).loopback()));
/// ```
#[derive(Default)]
pub struct FilterChain {
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all interfaces).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exclude filter (must not match ANY).
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, iface: &NetworkInterface) -> bool {
        !self.excludes.iter().any(|f| f.matches(iface))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

/// A fetcher decorator that drops interfaces not matching a filter.
///
/// # Examples
///
/// ```ignore
/// use netif_catalog::network::filter::{FilteredFetcher, FilterChain, LoopbackFilter};
/// use netif_catalog::network::platform::PlatformFetcher;
///
/// let fetcher = FilteredFetcher::new(
///     PlatformFetcher::new(),
///     FilterChain::new().exclude(LoopbackFilter),
/// );
/// let interfaces = fetcher.fetch()?; // No loopback
/// ```
#[derive(Debug)]
pub struct FilteredFetcher<F, A> {
    inner: F,
    filter: A,
}

impl<F, A> FilteredFetcher<F, A> {
    /// Creates a new filtered fetcher.
    #[must_use]
    pub const fn new(inner: F, filter: A) -> Self {
        Self { inner, filter }
    }
}

impl<F: InterfaceFetcher, A: InterfaceFilter> InterfaceFetcher for FilteredFetcher<F, A> {
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
        let interfaces = self.inner.fetch()?;
        Ok(interfaces
            .into_iter()
            .filter(|iface| self.filter.matches(iface))
            .collect())
    }
}

impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, iface: &NetworkInterface) -> bool {
        (*self).matches(iface)
    }
}

impl InterfaceFilter for Box<dyn InterfaceFilter> {
    fn matches(&self, iface: &NetworkInterface) -> bool {
        self.as_ref().matches(iface)
    }
}
