//! Device registry implementation
//!
//! The registry is loaded once from static configuration and is the sole
//! authority for ID → address resolution. Device records are immutable for
//! the process lifetime; the only mutable state is the last-relayed-color
//! cache used by the enumeration snapshot.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use tokio::sync::RwLock;

use super::device::{Device, DeviceStatus};
use super::error::RegistryError;

/// Color every device reports before any command has been relayed to it
const DEFAULT_COLOR: &str = "fff";

/// Static mapping of device ID → IPv4 address, in configuration order
///
/// Lookups are lock-free; only the color cache takes a lock. Both ingress
/// paths and the dispatcher share one registry behind an `Arc`.
pub struct DeviceRegistry {
    /// Devices in configuration order, used for enumeration and broadcast
    devices: Vec<Device>,
    /// ID → index into `devices`
    index: HashMap<String, usize>,
    /// Last color successfully relayed, keyed by device ID
    colors: RwLock<HashMap<String, String>>,
}

impl DeviceRegistry {
    /// Build a registry from `(id, ipv4)` configuration entries
    ///
    /// Fails if an ID repeats or an address is not a valid IPv4 literal.
    /// Every device starts with the default color in the cache.
    pub fn new<I, S, A>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, A)>,
        S: Into<String>,
        A: AsRef<str>,
    {
        let mut devices = Vec::new();
        let mut index = HashMap::new();
        let mut colors = HashMap::new();

        for (id, addr) in entries {
            let id = id.into();
            let addr: Ipv4Addr =
                addr.as_ref()
                    .parse()
                    .map_err(|_| RegistryError::InvalidAddress {
                        id: id.clone(),
                        addr: addr.as_ref().to_string(),
                    })?;

            if index.contains_key(&id) {
                return Err(RegistryError::DuplicateId(id));
            }

            index.insert(id.clone(), devices.len());
            colors.insert(id.clone(), DEFAULT_COLOR.to_string());
            devices.push(Device::new(id, addr));
        }

        tracing::info!(devices = devices.len(), "device registry loaded");

        Ok(Self {
            devices,
            index,
            colors: RwLock::new(colors),
        })
    }

    /// All configured devices, in configuration order
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// All known device IDs, in configuration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|d| d.id.as_str())
    }

    /// Resolve a device ID to its configured address
    pub fn address_of(&self, id: &str) -> Result<Ipv4Addr, RegistryError> {
        self.index
            .get(id)
            .map(|&i| self.devices[i].addr)
            .ok_or_else(|| RegistryError::UnknownDevice(id.to_string()))
    }

    /// Number of configured devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the registry has no devices
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Record the last color successfully relayed to a device
    ///
    /// Called by the dispatcher after each successful send; IDs not in the
    /// registry are ignored (the dispatcher resolves before sending).
    pub async fn record_color(&self, id: &str, color: &str) {
        let mut colors = self.colors.write().await;
        if let Some(entry) = colors.get_mut(id) {
            *entry = color.to_string();
        }
    }

    /// Ordered enumeration snapshot of every device with its last color
    ///
    /// This is the record set served to external listing surfaces.
    pub async fn snapshot(&self) -> Vec<DeviceStatus> {
        let colors = self.colors.read().await;
        self.devices
            .iter()
            .map(|d| DeviceStatus {
                id: d.id.clone(),
                ip: d.addr,
                color: colors
                    .get(&d.id)
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            })
            .collect()
    }
}
