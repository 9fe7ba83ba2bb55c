use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Zone apex every answer is built around.
    #[serde(default = "default_root")]
    pub root: String,

    /// TTL for zone records and bare subdomains.
    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Address handed out for the zone. Resolved from `root` at startup when unset.
    #[serde(default)]
    pub ip: Option<Ipv4Addr>,

    /// Appended to `YYYYMMDD` to form the SOA serial.
    #[serde(default = "default_serial_suffix")]
    pub serial_suffix: String,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            ttl: default_ttl(),
            ip: None,
            serial_suffix: default_serial_suffix(),
        }
    }
}

fn default_root() -> String {
    "localhost".to_string()
}

fn default_ttl() -> u32 {
    60
}

fn default_serial_suffix() -> String {
    "1".to_string()
}
