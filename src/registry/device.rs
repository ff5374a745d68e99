//! Device records
//!
//! A device is one networked RGB controller: a stable logical ID plus the
//! IPv4 address it listens on. Records are created from static
//! configuration at startup and never mutated.

use std::net::Ipv4Addr;

/// One configured controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Stable logical identifier, unique across the registry
    pub id: String,
    /// Controller IPv4 address
    pub addr: Ipv4Addr,
}

impl Device {
    /// Create a new device record
    pub fn new(id: impl Into<String>, addr: Ipv4Addr) -> Self {
        Self {
            id: id.into(),
            addr,
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.id, self.addr)
    }
}

/// Enumeration snapshot of one device, including its last relayed color
///
/// This is the record shape consumed by external listing surfaces (e.g. an
/// HTTP device endpoint); the registry owns no HTTP concerns itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceStatus {
    pub id: String,
    pub ip: Ipv4Addr,
    /// Last color successfully relayed to this device
    pub color: String,
}
