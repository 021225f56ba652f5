use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a [`CapabilityRegistry`](crate::registry::CapabilityRegistry)
/// from its configuration source.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid camera record #{index}: {reason}")]
    Invalid { index: usize, reason: String },
    #[error("Registry is already initialized")]
    AlreadyInitialized,
    #[error("Failed to write config: {0}")]
    Write(String),
}

/// Failure of the external enumeration service.
///
/// The resolver never surfaces this; it is treated as an empty device list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    #[error("Enumeration service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Enumeration backend error: {0}")]
    Backend(String),
}
