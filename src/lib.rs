//! netif-catalog: Network Interface & Address Discovery
//!
//! A library for enumerating host network interfaces, selecting the ones a
//! server can usefully bind to, and reporting their IPv4 addresses, plus the
//! small host helpers (device name, properties, asset copying) such a server
//! needs around it.

pub mod config;
pub mod host;
pub mod network;
