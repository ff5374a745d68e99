//! Controller discovery
//!
//! Best-effort UDP broadcast probe that surfaces controllers present on
//! the local network. Fully decoupled from the device registry: responses
//! are observed, never reconciled.

pub mod service;

pub use service::{DiscoveryResponse, DiscoveryService};
