//! Outbound relay
//!
//! One long-lived UDP socket, one dispatch policy. The dispatcher is the
//! only component that touches network I/O for commands; everything above
//! it hands over a decoded [`crate::protocol::Command`] and moves on.

pub mod dispatcher;
pub mod transport;

pub use dispatcher::RelayDispatcher;
pub use transport::{Transport, UdpTransport};
