//! Windows-specific interface enumeration using `GetAdaptersAddresses`.

use crate::network::{FetchError, InterfaceAddress, InterfaceFetcher, NetworkInterface};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`InterfaceFetcher`] using `GetAdaptersAddresses`.
///
/// Interfaces are named by their friendly name ("Ethernet", "Wi-Fi").
///
/// # Example
///
/// ```no_run
/// use netif_catalog::network::{InterfaceFetcher, platform::WindowsFetcher};
///
/// let fetcher = WindowsFetcher::new();
/// for iface in fetcher.fetch().expect("Failed to fetch interfaces") {
///     println!("{}: {:?}", iface.name, iface.addresses);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsFetcher {
    _private: (),
}

impl WindowsFetcher {
    /// Creates a new Windows interface fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceFetcher for WindowsFetcher {
    fn fetch(&self) -> Result<Vec<NetworkInterface>, FetchError> {
        fetch_interfaces()
    }
}

/// Fetches all interfaces using `GetAdaptersAddresses`.
fn fetch_interfaces() -> Result<Vec<NetworkInterface>, FetchError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut interfaces = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list is valid as long as `raw_adapters` is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(iface) = parse_adapter(adapter) {
            interfaces.push(iface);
        }

        current = adapter.Next;
    }

    Ok(interfaces)
}

/// Calls `GetAdaptersAddresses`, retrying once with the size the API asks for.
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, potentially retrying with a larger buffer.
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: windows::Win32::NetworkManagement::IpHelper::GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), FetchError> {
    use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let result = if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as above, but with correctly sized buffer
        unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        }
    } else {
        result
    };

    if result == ERROR_ACCESS_DENIED.0 {
        return Err(FetchError::PermissionDenied {
            context: "GetAdaptersAddresses".to_string(),
        });
    }
    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

/// Parses one `IP_ADAPTER_ADDRESSES_LH` into a [`NetworkInterface`].
///
/// Returns `None` if the friendly name cannot be read.
fn parse_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<NetworkInterface> {
    let name = unsafe { adapter.FriendlyName.to_string().ok()? };

    Some(NetworkInterface {
        name,
        is_up: adapter.OperStatus == IfOperStatusUp,
        is_loopback: adapter.IfType == IF_TYPE_SOFTWARE_LOOPBACK,
        addresses: collect_addresses(adapter),
    })
}

/// Collects unicast addresses in the order Windows lists them.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<InterfaceAddress> {
    let mut addresses = Vec::new();

    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let addr_entry = unsafe { &*unicast };

        // SAFETY: Address points to either SOCKADDR_IN or SOCKADDR_IN6.
        if let Some(sockaddr) = unsafe { addr_entry.Address.lpSockaddr.as_ref() } {
            let ip = match sockaddr.sa_family {
                f if f == AF_INET => {
                    // SAFETY: We verified the family is AF_INET.
                    let sockaddr_in =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
                    Some(IpAddr::V4(Ipv4Addr::new(
                        octets.s_b1,
                        octets.s_b2,
                        octets.s_b3,
                        octets.s_b4,
                    )))
                }
                f if f == AF_INET6 => {
                    // SAFETY: We verified the family is AF_INET6.
                    let sockaddr_in6 =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                    let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
                    Some(IpAddr::V6(Ipv6Addr::from(octets)))
                }
                _ => None,
            };

            if let Some(ip) = ip {
                addresses.push(InterfaceAddress::from_ip(
                    ip,
                    Some(addr_entry.OnLinkPrefixLength),
                ));
            }
        }

        unicast = unsafe { (*unicast).Next };
    }

    addresses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_fetcher_default_creates_instance() {
        let _fetcher = WindowsFetcher::default();
    }

    // Integration test: actually fetches interfaces from the system
    #[test]
    fn fetch_interfaces_returns_at_least_loopback() {
        let result = WindowsFetcher::new().fetch();

        assert!(result.is_ok(), "fetch() failed: {:?}", result.err());

        let interfaces = result.unwrap();
        let has_loopback_addr = interfaces.iter().any(|i| {
            i.addresses
                .iter()
                .filter_map(InterfaceAddress::as_ip)
                .any(|ip| ip.is_loopback())
        });

        assert!(
            has_loopback_addr,
            "Expected at least loopback address, got interfaces: {interfaces:?}"
        );
    }

    #[test]
    fn fetch_interfaces_names_are_not_empty() {
        let interfaces = WindowsFetcher::new().fetch().expect("fetch() failed");

        for iface in &interfaces {
            assert!(!iface.name.is_empty(), "Interface name should not be empty: {iface:?}");
        }
    }
}
