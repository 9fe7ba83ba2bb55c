use crate::config::ZoneConfig;
use crate::{DomainError, DomainName};
use chrono::NaiveDate;
use std::net::Ipv4Addr;

/// Everything needed to build the zone, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ZoneSettings {
    pub root: DomainName,
    pub ip: Ipv4Addr,
    pub ttl: u32,
    pub serial: u32,
}

impl ZoneSettings {
    pub fn new(root: &str, ip: Ipv4Addr, ttl: u32, serial: u32) -> Self {
        Self {
            root: DomainName::new(root),
            ip,
            ttl,
            serial,
        }
    }

    /// `ip` is passed separately because the configured one is optional.
    pub fn from_config(
        config: &ZoneConfig,
        ip: Ipv4Addr,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let serial = zone_serial(today, &config.serial_suffix)?;
        Ok(Self::new(&config.root, ip, config.ttl, serial))
    }
}

/// `YYYYMMDD` followed by `suffix`, read as a decimal number.
pub fn zone_serial(date: NaiveDate, suffix: &str) -> Result<u32, DomainError> {
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidSerial(format!(
            "suffix '{}' must be one or more decimal digits",
            suffix
        )));
    }

    let digits = format!("{}{}", date.format("%Y%m%d"), suffix);
    digits
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidSerial(format!("{} does not fit in 32 bits", digits)))
}
