//! Decoded command types
//!
//! Both ingress paths (raw UDP datagrams and push-channel events) converge
//! on the [`Command`] type, which is the single input to the relay
//! dispatcher.

/// A decoded color-change command
///
/// Ephemeral: constructed per inbound event, consumed once by the
/// dispatcher, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Target device ID; `None` means broadcast to every registered device
    pub target: Option<String>,
    /// Optional sub-path qualifying which part of the device is addressed;
    /// empty means "whole device"
    pub zone: String,
    /// Opaque color token, forwarded verbatim to the controller
    pub color: String,
}

impl Command {
    /// Create a broadcast-all command
    pub fn broadcast(color: impl Into<String>) -> Self {
        Self {
            target: None,
            zone: String::new(),
            color: color.into(),
        }
    }

    /// Create a command targeting a single device (and optional zone)
    pub fn unicast(
        target: impl Into<String>,
        zone: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            target: Some(target.into()),
            zone: zone.into(),
            color: color.into(),
        }
    }

    /// Whether this command fans out to every registered device
    pub fn is_broadcast(&self) -> bool {
        self.target.is_none()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(id) if self.zone.is_empty() => write!(f, "{}:{}", id, self.color),
            Some(id) => write!(f, "{}.{}:{}", id, self.zone, self.color),
            None => write!(f, "{}", self.color),
        }
    }
}

/// Split a dot-joined composite target into `(id, zone)`
///
/// The first segment is the device ID; the remainder, re-joined with `.`,
/// is the zone (empty when no zone is present).
pub fn split_target(target: &str) -> (&str, &str) {
    match target.split_once('.') {
        Some((id, zone)) => (id, zone),
        None => (target, ""),
    }
}
