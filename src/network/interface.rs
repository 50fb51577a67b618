//! Core network types for interface representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Serialize, Serializer};

/// Address family, classified by the length of the raw address bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    /// 4-byte addresses.
    V4,
    /// 16-byte addresses.
    V6,
    /// Anything else, preserving the raw byte length for debugging.
    Other(usize),
}

impl AddressFamily {
    /// Classifies a raw address by its byte length alone.
    #[must_use]
    pub const fn from_len(len: usize) -> Self {
        match len {
            4 => Self::V4,
            16 => Self::V6,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
            Self::Other(len) => write!(f, "other({len} bytes)"),
        }
    }
}

/// One address bound to an interface.
///
/// The raw bytes are the source of truth: the family and the text form are
/// both derived from them. `Display` appends `/prefix` when the prefix length
/// is known; use [`InterfaceAddress::text`] for the bare address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceAddress {
    raw: Vec<u8>,
    prefix_len: Option<u8>,
}

impl InterfaceAddress {
    /// Creates an address from raw bytes as reported by the OS.
    #[must_use]
    pub fn from_raw(raw: impl Into<Vec<u8>>, prefix_len: Option<u8>) -> Self {
        Self {
            raw: raw.into(),
            prefix_len,
        }
    }

    /// Creates an address from a parsed IP address.
    #[must_use]
    pub fn from_ip(ip: IpAddr, prefix_len: Option<u8>) -> Self {
        let raw = match ip {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        };
        Self::from_raw(raw, prefix_len)
    }

    /// Raw address bytes (4 for IPv4, 16 for IPv6).
    #[must_use]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Prefix length, when the OS reported one.
    #[must_use]
    pub const fn prefix_len(&self) -> Option<u8> {
        self.prefix_len
    }

    /// Address family derived from the raw byte length.
    #[must_use]
    pub fn family(&self) -> AddressFamily {
        AddressFamily::from_len(self.raw.len())
    }

    /// Returns true if the raw address is exactly 4 bytes long.
    #[must_use]
    pub fn is_ipv4(&self) -> bool {
        self.family() == AddressFamily::V4
    }

    /// Returns the address as [`Ipv4Addr`] if it is 4 bytes long.
    #[must_use]
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        <[u8; 4]>::try_from(self.raw.as_slice())
            .ok()
            .map(Ipv4Addr::from)
    }

    /// Returns the address as [`IpAddr`] for the two known families.
    #[must_use]
    pub fn as_ip(&self) -> Option<IpAddr> {
        if let Some(v4) = self.as_ipv4() {
            return Some(IpAddr::V4(v4));
        }
        <[u8; 16]>::try_from(self.raw.as_slice())
            .ok()
            .map(|octets| IpAddr::V6(Ipv6Addr::from(octets)))
    }

    /// Human-readable address without any prefix suffix.
    ///
    /// Unknown families are rendered as colon-separated hex bytes.
    #[must_use]
    pub fn text(&self) -> String {
        self.as_ip().map_or_else(
            || {
                self.raw
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<Vec<_>>()
                    .join(":")
            },
            |ip| ip.to_string(),
        )
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix_len {
            Some(prefix) => write!(f, "{}/{prefix}", self.text()),
            None => write!(f, "{}", self.text()),
        }
    }
}

impl Serialize for InterfaceAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("InterfaceAddress", 3)?;
        state.serialize_field("family", &self.family())?;
        state.serialize_field("address", &self.text())?;
        state.serialize_field("prefix_len", &self.prefix_len)?;
        state.end()
    }
}

/// A snapshot of one host network interface at a point in time.
///
/// Read fresh from the OS on every query and never mutated afterwards.
///
/// # Equality
///
/// Address order matters for equality comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    /// OS interface name (e.g., "eth0", "wlan0"). Unique per snapshot.
    pub name: String,
    /// OS-reported operational state.
    pub is_up: bool,
    /// Whether the OS flags this interface as loopback.
    pub is_loopback: bool,
    /// Bound addresses in the order the OS reported them.
    pub addresses: Vec<InterfaceAddress>,
}

impl NetworkInterface {
    /// Creates a new interface snapshot that is not flagged as loopback.
    #[must_use]
    pub fn new(name: impl Into<String>, is_up: bool, addresses: Vec<InterfaceAddress>) -> Self {
        Self {
            name: name.into(),
            is_up,
            is_loopback: false,
            addresses,
        }
    }

    /// Marks the interface as loopback.
    #[must_use]
    pub const fn loopback(mut self) -> Self {
        self.is_loopback = true;
        self
    }

    /// Returns true if any bound address is 4 bytes long.
    #[must_use]
    pub fn has_ipv4(&self) -> bool {
        self.addresses.iter().any(InterfaceAddress::is_ipv4)
    }

    /// IPv4 addresses in OS order.
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.addresses.iter().filter_map(InterfaceAddress::as_ipv4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod address_family {
        use super::*;

        #[test]
        fn classified_by_length_only() {
            assert_eq!(AddressFamily::from_len(4), AddressFamily::V4);
            assert_eq!(AddressFamily::from_len(16), AddressFamily::V6);
            assert_eq!(AddressFamily::from_len(6), AddressFamily::Other(6));
            assert_eq!(AddressFamily::from_len(0), AddressFamily::Other(0));
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(AddressFamily::V4.to_string(), "IPv4");
            assert_eq!(AddressFamily::V6.to_string(), "IPv6");
            assert_eq!(AddressFamily::Other(6).to_string(), "other(6 bytes)");
        }
    }

    mod interface_address {
        use super::*;

        #[test]
        fn ipv4_from_ip_has_four_raw_bytes() {
            let addr = InterfaceAddress::from_ip("192.168.1.5".parse().unwrap(), Some(24));

            assert_eq!(addr.raw_bytes(), &[192, 168, 1, 5]);
            assert_eq!(addr.family(), AddressFamily::V4);
            assert!(addr.is_ipv4());
        }

        #[test]
        fn ipv6_from_ip_has_sixteen_raw_bytes() {
            let addr = InterfaceAddress::from_ip("fe80::1".parse().unwrap(), Some(64));

            assert_eq!(addr.raw_bytes().len(), 16);
            assert_eq!(addr.family(), AddressFamily::V6);
            assert!(!addr.is_ipv4());
            assert_eq!(addr.as_ipv4(), None);
        }

        #[test]
        fn ipv4_mapped_ipv6_is_not_ipv4() {
            let addr = InterfaceAddress::from_ip("::ffff:10.0.0.1".parse().unwrap(), None);

            assert_eq!(addr.family(), AddressFamily::V6);
            assert_eq!(addr.as_ipv4(), None);
        }

        #[test]
        fn text_never_contains_prefix() {
            let addr = InterfaceAddress::from_ip("10.0.0.7".parse().unwrap(), Some(8));

            assert_eq!(addr.text(), "10.0.0.7");
            assert_eq!(addr.to_string(), "10.0.0.7/8");
        }

        #[test]
        fn display_without_prefix_is_bare() {
            let addr = InterfaceAddress::from_ip("10.0.0.7".parse().unwrap(), None);
            assert_eq!(addr.to_string(), "10.0.0.7");
        }

        #[test]
        fn other_family_renders_hex() {
            let addr = InterfaceAddress::from_raw(vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01], None);

            assert_eq!(addr.family(), AddressFamily::Other(6));
            assert_eq!(addr.as_ip(), None);
            assert_eq!(addr.text(), "de:ad:be:ef:00:01");
        }

        #[test]
        fn serializes_bare_address_and_family() {
            let addr = InterfaceAddress::from_ip("192.168.1.5".parse().unwrap(), Some(24));
            let json = serde_json::to_value(&addr).unwrap();

            assert_eq!(json["address"], "192.168.1.5");
            assert_eq!(json["family"], "V4");
            assert_eq!(json["prefix_len"], 24);
        }
    }

    mod network_interface {
        use super::*;

        fn make_interface() -> NetworkInterface {
            NetworkInterface::new(
                "eth0",
                true,
                vec![
                    InterfaceAddress::from_ip("fe80::1".parse().unwrap(), Some(64)),
                    InterfaceAddress::from_ip("192.168.1.5".parse().unwrap(), Some(24)),
                    InterfaceAddress::from_ip("192.168.1.6".parse().unwrap(), Some(24)),
                ],
            )
        }

        #[test]
        fn new_is_not_loopback() {
            let iface = make_interface();

            assert_eq!(iface.name, "eth0");
            assert!(iface.is_up);
            assert!(!iface.is_loopback);
            assert!(iface.clone().loopback().is_loopback);
        }

        #[test]
        fn has_ipv4_true_with_any_ipv4() {
            assert!(make_interface().has_ipv4());
        }

        #[test]
        fn has_ipv4_false_with_only_ipv6() {
            let iface = NetworkInterface::new(
                "tun0",
                true,
                vec![InterfaceAddress::from_ip("fe80::2".parse().unwrap(), None)],
            );
            assert!(!iface.has_ipv4());
        }

        #[test]
        fn has_ipv4_false_when_empty() {
            assert!(!NetworkInterface::new("eth1", false, vec![]).has_ipv4());
        }

        #[test]
        fn ipv4_addresses_preserve_os_order() {
            let addrs: Vec<Ipv4Addr> = make_interface().ipv4_addresses().collect();
            assert_eq!(
                addrs,
                vec![Ipv4Addr::new(192, 168, 1, 5), Ipv4Addr::new(192, 168, 1, 6)]
            );
        }

        #[test]
        fn equality_requires_same_address_order() {
            let first = make_interface();
            let mut second = make_interface();
            second.addresses.reverse();

            assert_ne!(first, second);
        }
    }
}
