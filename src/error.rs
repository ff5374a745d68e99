//! Crate-wide error types
//!
//! Per-command failures (malformed datagrams, unknown device IDs, transient
//! send errors) are local: they are logged and the offending command is
//! dropped without affecting other in-flight commands. Only listener bind
//! failures at startup are fatal.

use std::net::SocketAddr;

use crate::registry::RegistryError;

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug)]
pub enum Error {
    /// A datagram or push event could not be decoded into a command
    Command(CommandError),
    /// Device registry lookup or construction failed
    Registry(RegistryError),
    /// A UDP socket failed to bind at startup (fatal, no fallback port)
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    /// OS-level send failure; the socket stays open and reusable
    Send(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Command(e) => write!(f, "Command decode failed: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Bind { addr, source } => {
                write!(f, "Failed to bind UDP socket on {}: {}", addr, source)
            }
            Error::Send(e) => write!(f, "UDP send failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Command(e) => Some(e),
            Error::Registry(e) => Some(e),
            Error::Bind { source, .. } => Some(source),
            Error::Send(e) => Some(e),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

/// Error type for command decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Datagram was empty (or whitespace only)
    EmptyDatagram,
    /// No color field could be extracted
    MissingColor,
    /// Push event carried an empty device field
    MissingDevice,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::EmptyDatagram => write!(f, "empty datagram"),
            CommandError::MissingColor => write!(f, "missing color field"),
            CommandError::MissingDevice => write!(f, "missing device field"),
        }
    }
}

impl std::error::Error for CommandError {}
