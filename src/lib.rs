//! # rgbcast
//!
//! UDP command relay and discovery for networked RGB light controllers.
//!
//! Color-change commands arrive on two ingress paths — a raw UDP command
//! port and a push-channel event queue — and converge on one dispatcher
//! that resolves logical device IDs through a static registry and relays
//! newline-terminated color tokens to controllers over UDP. A separate
//! broadcast discovery service surfaces controllers on the local network.
//!
//! ```text
//!   UDP :1337 ───► RelayServer ──┐
//!                                ├──► RelayDispatcher ──► controllers :1337
//!   push events ─► PushIngress ──┘          │
//!                                     DeviceRegistry (id → IPv4, read-only)
//!
//!   DiscoveryService: "hello" ─► 255.255.255.255:1341, responses ◄─ :1340
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rgbcast::{DeviceRegistry, RelayConfig, RelayServer};
//!
//! # async fn example() -> rgbcast::Result<()> {
//! let registry = Arc::new(DeviceRegistry::new([
//!     ("desk", "192.168.1.20"),
//!     ("shelf", "192.168.1.21"),
//! ])?);
//!
//! let server = RelayServer::new(RelayConfig::default(), registry).await?;
//! let push = server.spawn_push_ingress();
//!
//! push.send(rgbcast::PushEvent::new("desk", "ff00ff")).await.ok();
//! server.run().await
//! # }
//! ```
//!
//! UDP delivery is best-effort and unordered; the relay makes no delivery
//! guarantees and carries no authentication or encryption.

pub mod discovery;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod relay;
pub mod server;

pub use discovery::{DiscoveryResponse, DiscoveryService};
pub use error::{CommandError, Error, Result};
pub use protocol::Command;
pub use registry::{Device, DeviceRegistry, DeviceStatus, RegistryError};
pub use relay::{RelayDispatcher, Transport, UdpTransport};
pub use server::{PushEvent, RelayConfig, RelayServer};
