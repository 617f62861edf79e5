//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `RERANK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_GRPC_PORT, DEFAULT_GRPC_WORKERS, DEFAULT_HTTP_PORT, DEFAULT_MAX_SEQ_LEN,
    default_model_path,
};
use crate::model::CrossEncoderConfig;

/// Service configuration loaded from environment variables.
///
/// Shared by both binaries: the HTTP service reads `http_port`, the gRPC service reads
/// `grpc_port` and `grpc_workers`. Use [`Config::from_env`] to read overrides on top of
/// defaults, then [`Config::validate`] before loading the model.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address to bind to. Default: `::` (IPv4 and IPv6).
    pub bind_addr: IpAddr,

    /// HTTP service port. Default: `8000`.
    pub http_port: u16,

    /// gRPC service port. Default: `50051`.
    pub grpc_port: u16,

    /// Model artifact directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// Default: `/app/model`.
    pub model_path: PathBuf,

    /// Concurrent inference slots for the gRPC service. Default: `10`.
    pub grpc_workers: usize,

    /// Token budget per (query, document) pair. Default: `512`.
    pub max_seq_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            http_port: DEFAULT_HTTP_PORT,
            grpc_port: DEFAULT_GRPC_PORT,
            model_path: default_model_path().to_path_buf(),
            grpc_workers: DEFAULT_GRPC_WORKERS,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl Config {
    const ENV_BIND_ADDR: &'static str = "RERANK_BIND_ADDR";
    const ENV_HTTP_PORT: &'static str = "RERANK_HTTP_PORT";
    const ENV_GRPC_PORT: &'static str = "RERANK_GRPC_PORT";
    const ENV_MODEL_PATH: &'static str = "RERANK_MODEL_PATH";
    const ENV_GRPC_WORKERS: &'static str = "RERANK_GRPC_WORKERS";
    const ENV_MAX_SEQ_LEN: &'static str = "RERANK_MAX_SEQ_LEN";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let http_port = Self::parse_port_from_env(Self::ENV_HTTP_PORT, defaults.http_port)?;
        let grpc_port = Self::parse_port_from_env(Self::ENV_GRPC_PORT, defaults.grpc_port)?;
        let model_path = Self::parse_path_from_env(Self::ENV_MODEL_PATH, defaults.model_path);
        let grpc_workers =
            Self::parse_usize_from_env(Self::ENV_GRPC_WORKERS, defaults.grpc_workers)?;
        let max_seq_len = Self::parse_usize_from_env(Self::ENV_MAX_SEQ_LEN, defaults.max_seq_len)?;

        Ok(Self {
            bind_addr,
            http_port,
            grpc_port,
            model_path,
            grpc_workers,
            max_seq_len,
        })
    }

    /// Validates paths and basic invariants.
    ///
    /// A missing model directory is reported here so that neither service starts
    /// listening without its model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.model_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.model_path.clone(),
            });
        }
        if !self.model_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.model_path.clone(),
            });
        }

        if self.grpc_workers == 0 {
            return Err(ConfigError::InvalidNumber {
                name: Self::ENV_GRPC_WORKERS,
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(ConfigError::InvalidNumber {
                name: Self::ENV_MAX_SEQ_LEN,
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    pub fn http_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    pub fn grpc_socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.grpc_port)
    }

    /// Builds the model configuration from the model path and sequence budget.
    pub fn cross_encoder_config(&self) -> CrossEncoderConfig {
        CrossEncoderConfig::new(&self.model_path).with_max_seq_len(self.max_seq_len)
    }

    fn parse_port_from_env(var_name: &'static str, default: u16) -> Result<u16, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort {
                        name: var_name,
                        value,
                    });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }
}
