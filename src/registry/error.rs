//! Registry error types
//!
//! Error types for device registry construction and lookup.

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Device ID not present in the registry
    UnknownDevice(String),
    /// Two configured devices share the same ID
    DuplicateId(String),
    /// Configured address is not a valid IPv4 literal
    InvalidAddress { id: String, addr: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownDevice(id) => write!(f, "Unknown device: {}", id),
            RegistryError::DuplicateId(id) => write!(f, "Duplicate device ID: {}", id),
            RegistryError::InvalidAddress { id, addr } => {
                write!(f, "Invalid IPv4 address for device {}: {}", id, addr)
            }
        }
    }
}

impl std::error::Error for RegistryError {}
