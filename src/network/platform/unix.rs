//! Unix interface enumeration using `getifaddrs`.

use std::net::{IpAddr, Ipv4Addr};

use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags;
use nix::sys::socket::SockaddrStorage;

use crate::network::{FetchError, InterfaceAddress, InterfaceFetcher, NetworkInterface};

/// Unix implementation of [`InterfaceFetcher`] using `getifaddrs(3)`.
///
/// `getifaddrs` yields one entry per (interface, address) pair, plus a
/// link-layer entry per interface on most systems. Entries are grouped back
/// into one [`NetworkInterface`] per name, in first-seen order.
///
/// # Example
///
/// ```no_run
/// use netif_catalog::network::{InterfaceFetcher, platform::UnixFetcher};
///
/// let fetcher = UnixFetcher::new();
/// for iface in fetcher.fetch().expect("getifaddrs failed") {
///     println!("{} up={} {:?}", iface.name, iface.is_up, iface.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixFetcher {
    _private: (),
}

impl UnixFetcher {
    /// Creates a new unix interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceFetcher for UnixFetcher {
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
        let entries = getifaddrs().map_err(std::io::Error::from)?;

        Ok(group_entries(entries.map(|entry| RawEntry {
            name: entry.interface_name,
            is_up: entry.flags.contains(InterfaceFlags::IFF_UP),
            is_loopback: entry.flags.contains(InterfaceFlags::IFF_LOOPBACK),
            address: entry.address.as_ref().and_then(sockaddr_ip),
            netmask: entry.netmask.as_ref().and_then(sockaddr_ip),
        })))
    }
}

/// One `getifaddrs` entry reduced to what the catalog needs.
#[derive(Debug, Clone)]
struct RawEntry {
    name: String,
    is_up: bool,
    is_loopback: bool,
    address: Option<IpAddr>,
    netmask: Option<IpAddr>,
}

/// Extracts the IP address from an inet or inet6 socket address.
///
/// Link-layer and other families yield `None`.
fn sockaddr_ip(storage: &SockaddrStorage) -> Option<IpAddr> {
    if let Some(sin) = storage.as_sockaddr_in() {
        return Some(IpAddr::V4(Ipv4Addr::from(sin.ip())));
    }
    storage.as_sockaddr_in6().map(|sin6| IpAddr::V6(sin6.ip()))
}

/// Counts the leading one bits of a netmask.
fn prefix_from_netmask(mask: IpAddr) -> u8 {
    let ones: u32 = match mask {
        IpAddr::V4(v4) => v4.octets().iter().map(|b| b.count_ones()).sum(),
        IpAddr::V6(v6) => v6.octets().iter().map(|b| b.count_ones()).sum(),
    };
    u8::try_from(ones).unwrap_or(u8::MAX)
}

/// Folds per-address entries into per-interface snapshots.
fn group_entries(entries: impl IntoIterator<Item = RawEntry>) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = Vec::new();

    for entry in entries {
        let index = if let Some(i) = interfaces.iter().position(|i| i.name == entry.name) {
            i
        } else {
            let mut iface = NetworkInterface::new(entry.name.clone(), entry.is_up, vec![]);
            iface.is_loopback = entry.is_loopback;
            interfaces.push(iface);
            interfaces.len() - 1
        };

        let iface = &mut interfaces[index];
        // Flags are per interface, but be lenient if entries disagree.
        iface.is_up |= entry.is_up;
        iface.is_loopback |= entry.is_loopback;

        if let Some(ip) = entry.address {
            let prefix = entry
                .netmask
                .filter(|m| m.is_ipv4() == ip.is_ipv4())
                .map(prefix_from_netmask);
            iface.addresses.push(InterfaceAddress::from_ip(ip, prefix));
        }
    }

    interfaces
}
