//! Interface catalog: the read-only query service over host interfaces.
//!
//! Every call performs one fresh enumeration through the injected
//! [`InterfaceFetcher`]; nothing is cached between calls.
//!
//! # Liveness quirk
//!
//! [`NicFilter::require_up`] is accepted but the liveness stage never inspects
//! [`NetworkInterface::is_up`]; down interfaces are still listed. Callers that
//! need the real operational state check `is_up` themselves, as
//! [`super::listen::listen_options`] does.

use thiserror::Error;

use super::{FetchError, InterfaceFetcher, NetworkInterface};

/// The two independent selection stages applied by [`InterfaceCatalog::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NicFilter {
    /// Liveness stage. Currently a pass-through; see the module docs.
    pub require_up: bool,
    /// Keep only interfaces with at least one 4-byte address.
    pub require_ipv4: bool,
}

impl NicFilter {
    /// Creates a filter from the two stage switches.
    #[must_use]
    pub const fn new(require_up: bool, require_ipv4: bool) -> Self {
        Self {
            require_up,
            require_ipv4,
        }
    }

    /// Returns true if the interface survives both stages.
    #[must_use]
    pub fn matches(&self, iface: &NetworkInterface) -> bool {
        // Liveness stage is a pass-through: `require_up` never consults `is_up`.
        !self.require_ipv4 || iface.has_ipv4()
    }
}

impl Default for NicFilter {
    /// Any liveness, IPv4 required.
    fn default() -> Self {
        Self::new(false, true)
    }
}

/// Error type for [`InterfaceCatalog::ipv4_addresses_of`].
#[derive(Debug, Error)]
pub enum LookupError {
    /// No interface with this name exists in the current snapshot.
    #[error("No such interface: {name}")]
    UnknownInterface {
        /// The name that failed to resolve.
        name: String,
    },

    /// The snapshot needed for name resolution could not be taken.
    #[error(transparent)]
    Enumeration(#[from] FetchError),
}

/// Identifies the interface whose addresses are wanted.
#[derive(Debug, Clone, Copy)]
pub enum InterfaceRef<'a> {
    /// Resolve by name against a fresh snapshot.
    Name(&'a str),
    /// Already resolved.
    Handle(&'a NetworkInterface),
}

impl<'a> From<&'a str> for InterfaceRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for InterfaceRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a NetworkInterface> for InterfaceRef<'a> {
    fn from(iface: &'a NetworkInterface) -> Self {
        Self::Handle(iface)
    }
}

/// Stateless query service answering "which interfaces and addresses can
/// this host use for a service".
///
/// # Examples
///
/// ```
/// use netif_catalog::network::{
///     FetchError, InterfaceAddress, InterfaceCatalog, InterfaceFetcher, NetworkInterface,
///     NicFilter,
/// };
///
/// struct Fixed;
///
/// impl InterfaceFetcher for Fixed {
///     fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
///         Ok(vec![
///             NetworkInterface::new(
///                 "lo0",
///                 true,
///                 vec![InterfaceAddress::from_ip("127.0.0.1".parse().unwrap(), Some(8))],
///             ),
///             NetworkInterface::new("eth0", false, vec![]),
///         ])
///     }
/// }
///
/// let catalog = InterfaceCatalog::new(Fixed);
/// let names: Vec<_> = catalog
///     .list(NicFilter::new(true, true))
///     .into_iter()
///     .map(|i| i.name)
///     .collect();
/// assert_eq!(names, ["lo0"]);
/// assert_eq!(catalog.ipv4_addresses_of("lo0").unwrap(), ["127.0.0.1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterfaceCatalog<F> {
    fetcher: F,
}

impl<F: InterfaceFetcher> InterfaceCatalog<F> {
    /// Creates a catalog over the given enumeration primitive.
    #[must_use]
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns the underlying fetcher.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Lists interfaces surviving `filter`, in OS enumeration order.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] from the enumeration primitive unchanged.
    pub fn try_list(&self, filter: NicFilter) -> Result<Vec<NetworkInterface>, FetchError> {
        let all = self.fetcher.fetch()?;
        let total = all.len();

        let selected: Vec<_> = all.into_iter().filter(|i| filter.matches(i)).collect();
        tracing::debug!(
            total,
            selected = selected.len(),
            require_up = filter.require_up,
            require_ipv4 = filter.require_ipv4,
            "Enumerated interfaces"
        );
        Ok(selected)
    }

    /// Lists interfaces surviving `filter`; enumeration failure yields an
    /// empty list.
    #[must_use]
    pub fn list(&self, filter: NicFilter) -> Vec<NetworkInterface> {
        self.try_list(filter).unwrap_or_else(|e| {
            tracing::warn!("Interface enumeration unavailable, treating as empty: {e}");
            Vec::new()
        })
    }

    /// [`Self::list`] with [`NicFilter::default`].
    #[must_use]
    pub fn list_default(&self) -> Vec<NetworkInterface> {
        self.list(NicFilter::default())
    }

    /// Looks up one interface by name in a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] from the enumeration primitive.
    pub fn find(&self, name: &str) -> Result<Option<NetworkInterface>, FetchError> {
        Ok(self.fetcher.fetch()?.into_iter().find(|i| i.name == name))
    }

    /// IPv4 addresses of one interface as bare text, in OS order.
    ///
    /// An interface without IPv4 addresses yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`LookupError::UnknownInterface`] if a name does not resolve
    /// - [`LookupError::Enumeration`] if the snapshot for resolution fails
    pub fn ipv4_addresses_of<'a>(
        &self,
        target: impl Into<InterfaceRef<'a>>,
    ) -> Result<Vec<String>, LookupError> {
        match target.into() {
            InterfaceRef::Handle(iface) => Ok(ipv4_texts(iface)),
            InterfaceRef::Name(name) => self
                .find(name)?
                .map(|iface| ipv4_texts(&iface))
                .ok_or_else(|| LookupError::UnknownInterface {
                    name: name.to_string(),
                }),
        }
    }
}

#[cfg(any(unix, windows))]
impl InterfaceCatalog<super::platform::PlatformFetcher> {
    /// Catalog over the host's real interfaces.
    #[must_use]
    pub fn system() -> Self {
        Self::new(super::platform::PlatformFetcher::default())
    }
}

/// Projects an interface onto its IPv4 text forms.
///
/// Each entry is the bare address; any `/` delimiter is stripped.
#[must_use]
pub fn ipv4_texts(iface: &NetworkInterface) -> Vec<String> {
    iface
        .addresses
        .iter()
        .filter(|a| a.is_ipv4())
        .map(|a| a.text().replace('/', ""))
        .collect()
}
