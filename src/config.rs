use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::domain::services::history_ring::DEFAULT_HISTORY_CAPACITY;

/// Runtime settings for the bridge server
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub host: IpAddr,
    pub port: u16,
    pub history_capacity: usize,      // Ingestion records kept in memory
    pub trailing_preview_bytes: usize, // Bytes of trailing data kept per record
    pub body_preview_chars: usize,    // Characters of body shown in details and logs
    pub max_body_bytes: usize,        // Larger bodies are recorded as unreadable
    pub admin_requests_per_minute: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            trailing_preview_bytes: 200,
            body_preview_chars: 500,
            max_body_bytes: 2 * 1024 * 1024,
            admin_requests_per_minute: 120,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> BridgeConfig {
        let mut config = BridgeConfig::default();

        if let Ok(host) = std::env::var("HOST") {
            match host.parse::<IpAddr>() {
                Ok(value) => config.host = value,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse HOST '{}': {}, using default: {}",
                        host,
                        e,
                        config.host
                    );
                }
            }
        }

        if let Ok(port) = std::env::var("PORT") {
            match port.parse::<u16>() {
                Ok(value) if value > 0 => config.port = value,
                _ => {
                    tracing::warn!(
                        "Invalid PORT value: {} (must be 1-65535), using default: {}",
                        port,
                        config.port
                    );
                }
            }
        }

        if let Ok(capacity) = std::env::var("MAX_HISTORY") {
            match capacity.parse::<usize>() {
                Ok(value) if (1..=10_000).contains(&value) => {
                    config.history_capacity = value;
                }
                _ => {
                    tracing::warn!(
                        "Invalid MAX_HISTORY value: {} (must be between 1 and 10000), using default: {}",
                        capacity,
                        config.history_capacity
                    );
                }
            }
        }

        if let Ok(preview) = std::env::var("TRAILING_PREVIEW_BYTES") {
            match preview.parse::<usize>() {
                Ok(value) if (1..=65_536).contains(&value) => {
                    config.trailing_preview_bytes = value;
                }
                _ => {
                    tracing::warn!(
                        "Invalid TRAILING_PREVIEW_BYTES value: {} (must be between 1 and 65536), using default: {}",
                        preview,
                        config.trailing_preview_bytes
                    );
                }
            }
        }

        if let Ok(preview) = std::env::var("BODY_PREVIEW_CHARS") {
            match preview.parse::<usize>() {
                Ok(value) if (1..=1_000_000).contains(&value) => {
                    config.body_preview_chars = value;
                }
                _ => {
                    tracing::warn!(
                        "Invalid BODY_PREVIEW_CHARS value: {} (must be between 1 and 1000000), using default: {}",
                        preview,
                        config.body_preview_chars
                    );
                }
            }
        }

        if let Ok(limit) = std::env::var("MAX_BODY_BYTES") {
            match limit.parse::<usize>() {
                // Between 1 KiB and 64 MiB
                Ok(value) if (1024..=64 * 1024 * 1024).contains(&value) => {
                    config.max_body_bytes = value;
                }
                _ => {
                    tracing::warn!(
                        "Invalid MAX_BODY_BYTES value: {} (must be between 1024 and 67108864), using default: {}",
                        limit,
                        config.max_body_bytes
                    );
                }
            }
        }

        if let Ok(rpm) = std::env::var("ADMIN_REQUESTS_PER_MINUTE") {
            match rpm.parse::<u32>() {
                Ok(value) if (1..=100_000).contains(&value) => {
                    config.admin_requests_per_minute = value;
                }
                _ => {
                    tracing::warn!(
                        "Invalid ADMIN_REQUESTS_PER_MINUTE value: {} (must be between 1 and 100000), using default: {}",
                        rpm,
                        config.admin_requests_per_minute
                    );
                }
            }
        }

        config
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
