//! Listen options: the choices a server offers for where to bind.
//!
//! The first option is always the wildcard address; the rest are the
//! interfaces that are up and carry IPv4. Options are identified by a string
//! id that can be stored in settings and resolved later, even after the
//! interface set has changed.

use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::{InterfaceCatalog, InterfaceFetcher};

/// Option id of the wildcard entry.
pub const ANY_OPTION_ID: &str = "0.0.0.0";

/// One entry in the list of places a server can listen on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListenOption {
    /// Bind to every interface.
    Any,
    /// Bind to the IPv4 addresses of one interface.
    Interface {
        /// Interface name, also the option id.
        name: String,
        /// Loopback interfaces get a distinct label.
        is_loopback: bool,
    },
}

impl ListenOption {
    /// Stable identifier for persisting the user's choice.
    #[must_use]
    pub fn option_id(&self) -> &str {
        match self {
            Self::Any => ANY_OPTION_ID,
            Self::Interface { name, .. } => name,
        }
    }

    /// Returns true for the wildcard entry.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for ListenOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any interface ({ANY_OPTION_ID})"),
            Self::Interface {
                name,
                is_loopback: true,
            } => write!(f, "{name} (loopback)"),
            Self::Interface { name, .. } => write!(f, "{name}"),
        }
    }
}

/// Builds the option list: wildcard first, then every up interface with an
/// IPv4 address, in OS order.
///
/// Enumeration failure leaves only the wildcard entry.
#[must_use]
pub fn listen_options<F: InterfaceFetcher>(catalog: &InterfaceCatalog<F>) -> Vec<ListenOption> {
    std::iter::once(ListenOption::Any)
        .chain(
            catalog
                .list_default()
                .into_iter()
                .filter(|iface| iface.is_up)
                .map(|iface| ListenOption::Interface {
                    name: iface.name,
                    is_loopback: iface.is_loopback,
                }),
        )
        .collect()
}

/// Index of the option with the given id, or 0 (the wildcard) if absent.
#[must_use]
pub fn position_of(options: &[ListenOption], option_id: &str) -> usize {
    options
        .iter()
        .position(|o| o.option_id() == option_id)
        .unwrap_or(0)
}

/// Resolves an option id to the IPv4 addresses to bind.
///
/// Falls back to the wildcard address when the interface is unknown, has no
/// IPv4 address, or the snapshot cannot be taken. Never returns an empty list.
#[must_use]
pub fn resolve_bind_addresses<F: InterfaceFetcher>(
    catalog: &InterfaceCatalog<F>,
    option_id: &str,
) -> Vec<Ipv4Addr> {
    if option_id == ANY_OPTION_ID {
        return vec![Ipv4Addr::UNSPECIFIED];
    }

    let addresses: Vec<Ipv4Addr> = match catalog.find(option_id) {
        Ok(Some(iface)) => iface.ipv4_addresses().collect(),
        Ok(None) => {
            tracing::warn!("Listen interface '{option_id}' not found, binding to all interfaces");
            return vec![Ipv4Addr::UNSPECIFIED];
        }
        Err(e) => {
            tracing::warn!("Cannot resolve listen interface '{option_id}': {e}; binding to all interfaces");
            return vec![Ipv4Addr::UNSPECIFIED];
        }
    };

    if addresses.is_empty() {
        tracing::warn!("Listen interface '{option_id}' has no IPv4 address, binding to all interfaces");
        return vec![Ipv4Addr::UNSPECIFIED];
    }

    tracing::debug!(interface = option_id, count = addresses.len(), "Resolved bind addresses");
    addresses
}
