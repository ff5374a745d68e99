//! Command ingress
//!
//! Two paths feed the relay: the raw UDP command listener and the
//! push-channel event queue. Both converge on the dispatcher with the
//! same decoded command shape.

pub mod config;
pub mod listener;
pub mod push;

pub use config::RelayConfig;
pub use listener::RelayServer;
pub use push::PushEvent;
