use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use super::zone::ZoneConfig;
use crate::zone::zone_serial;

const LOCAL_CONFIG_PATH: &str = "rebind-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/rebind-dns/config.toml";

/// Main configuration structure for the rebinding responder
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Zone served authoritatively
    #[serde(default)]
    pub zone: ZoneConfig,

    /// Resolver used for rebound targets
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rebind-dns.toml in current directory
    /// 3. /etc/rebind-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(root) = overrides.root {
            self.zone.root = root;
        }
        if let Some(ip) = overrides.ip {
            self.zone.ip = Some(ip);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.tcp_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "TCP timeout cannot be 0".to_string(),
            ));
        }

        // Names drop a single trailing dot, so anything left would never match.
        let root = self.zone.root.strip_suffix('.').unwrap_or(&self.zone.root);
        if root.is_empty() {
            return Err(ConfigError::Validation(
                "Zone root cannot be empty".to_string(),
            ));
        }
        if root.ends_with('.') {
            return Err(ConfigError::Validation(format!(
                "Zone root '{}' has more than one trailing dot",
                self.zone.root
            )));
        }

        zone_serial(chrono::Utc::now().date_naive(), &self.zone.serial_suffix)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        self.upstream.socket_addr()?;

        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream query timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub root: Option<String>,
    pub ip: Option<Ipv4Addr>,
    pub log_level: Option<String>,
}
