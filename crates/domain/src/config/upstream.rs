use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver used for rebound targets, `IP` or `IP:port`.
    #[serde(default = "default_resolver")]
    pub resolver: String,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl UpstreamConfig {
    /// Parses `resolver`, defaulting the port to 53 when only an address is given.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.resolver.trim();

        if let Ok(addr) = raw.parse::<SocketAddr>() {
            return Ok(addr);
        }

        raw.parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
            .map_err(|_| {
                ConfigError::Validation(format!("Invalid upstream resolver address '{}'", raw))
            })
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            resolver: default_resolver(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_resolver() -> String {
    "8.8.8.8".to_string()
}

fn default_query_timeout_ms() -> u64 {
    2000
}
