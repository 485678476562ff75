//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse};

use crate::error::{GrpcError, GrpcResult};

/// Configuration for gRPC server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum message size for decoding (default: 4MB)
    pub max_decoding_message_size: usize,
    /// Maximum message size for encoding (default: 4MB)
    pub max_encoding_message_size: usize,
    /// TCP keepalive interval in seconds (default: 60)
    pub keepalive_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
            enable_compression: true,
            max_decoding_message_size: 4 * 1024 * 1024, // 4MB
            max_encoding_message_size: 4 * 1024 * 1024, // 4MB
            keepalive_secs: 60,
        }
    }
}

/// Load configuration from environment variables.
///
/// Reads:
/// - `GRPC_HOST` (default: 0.0.0.0)
/// - `GRPC_PORT` (default: 50051)
/// - `GRPC_COMPRESSION` (default: true)
/// - `GRPC_MAX_MESSAGE_SIZE` (default: 4194304 / 4MB)
impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self::new()
            .with_host(env_or_default("GRPC_HOST", &defaults.host))
            .with_port(env_parse("GRPC_PORT", defaults.port)?)
            .with_compression(env_flag("GRPC_COMPRESSION", defaults.enable_compression)?)
            .with_max_message_size(env_parse(
                "GRPC_MAX_MESSAGE_SIZE",
                defaults.max_decoding_message_size,
            )?))
    }
}

impl ServerConfig {
    /// Create a new server config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host to bind to.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port to listen on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Set maximum message size.
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    /// Get the socket address to bind to.
    ///
    /// IPv6 hosts may be given bare (`::`) or bracketed (`[::]`).
    pub fn socket_addr(&self) -> GrpcResult<SocketAddr> {
        let addr = self.addr_string();
        addr.parse()
            .map_err(|source| GrpcError::InvalidAddress { addr, source })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn keepalive(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 50051);
        assert!(config.enable_compression);
        assert_eq!(config.addr_string(), "0.0.0.0:50051");
    }

    #[test]
    fn test_builder_pattern() {
        let config = ServerConfig::new()
            .with_host("127.0.0.1")
            .with_port(8080)
            .with_compression(false);

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.enable_compression);
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_ipv6_host() {
        let bare = ServerConfig::new().with_host("::1");
        let bracketed = ServerConfig::new().with_host("[::1]");

        assert_eq!(bare.addr_string(), "[::1]:50051");
        assert_eq!(bare.socket_addr().unwrap(), bracketed.socket_addr().unwrap());
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig::new().with_host("not a host");
        let err = config.socket_addr().unwrap_err();
        assert!(err.to_string().contains("not a host"));
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(
            ["GRPC_HOST", "GRPC_PORT", "GRPC_COMPRESSION", "GRPC_MAX_MESSAGE_SIZE"],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.host, "0.0.0.0");
                assert_eq!(config.port, 50051);
                assert!(config.enable_compression);
            },
        );
    }

    #[test]
    fn test_from_env_custom() {
        temp_env::with_vars(
            [
                ("GRPC_HOST", Some("127.0.0.1")),
                ("GRPC_PORT", Some("6000")),
                ("GRPC_COMPRESSION", Some("false")),
                ("GRPC_MAX_MESSAGE_SIZE", Some("1024")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.addr_string(), "127.0.0.1:6000");
                assert!(!config.enable_compression);
                assert_eq!(config.max_decoding_message_size, 1024);
                assert_eq!(config.max_encoding_message_size, 1024);
            },
        );
    }

    #[test]
    fn test_from_env_bad_port() {
        temp_env::with_var("GRPC_PORT", Some("http"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GRPC_PORT"));
        });
    }
}
