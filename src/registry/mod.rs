//! Device registry
//!
//! The registry is the single owner of device records and the sole
//! authority for ID → address resolution. It is loaded once at startup
//! from static configuration and read-only for the lifetime of the
//! process; no other component holds device state of its own.
//!
//! The one piece of mutable state is the last-relayed-color cache, kept
//! here because the registry answers the enumeration query that exposes
//! those colors.

pub mod device;
pub mod error;
pub mod store;

pub use device::{Device, DeviceStatus};
pub use error::RegistryError;
pub use store::DeviceRegistry;
