//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}' for {name}: must be between 1 and 65535")]
    InvalidPort { name: &'static str, value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}' for {name}: {source}")]
    PortParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting could not be parsed or is out of range.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
