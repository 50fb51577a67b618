//! Network interface and address discovery.
//!
//! This module provides types and traits for:
//! - Representing interfaces and their addresses ([`NetworkInterface`], [`InterfaceAddress`])
//! - Enumerating host interfaces ([`InterfaceFetcher`], [`platform`])
//! - Querying usable interfaces and IPv4 addresses ([`InterfaceCatalog`])
//! - Hiding interfaces by name or kind ([`filter`])
//! - Offering and resolving listen choices ([`listen`])

mod catalog;
mod fetcher;
pub mod filter;
mod interface;
pub mod listen;
pub mod platform;


pub use catalog::{InterfaceCatalog, InterfaceRef, LookupError, NicFilter, ipv4_texts};
pub use fetcher::{FetchError, InterfaceFetcher};
pub use interface::{AddressFamily, InterfaceAddress, NetworkInterface};
