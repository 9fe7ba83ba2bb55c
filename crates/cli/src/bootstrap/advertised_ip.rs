use anyhow::Context;
use rebind_dns_domain::config::ZoneConfig;
use std::net::{IpAddr, Ipv4Addr};
use tracing::info;

/// The configured zone address, or the first IPv4 address the root resolves to
/// through the system resolver.
pub async fn resolve_advertised_ip(zone: &ZoneConfig) -> anyhow::Result<Ipv4Addr> {
    if let Some(ip) = zone.ip {
        return Ok(ip);
    }

    let root = zone.root.trim_end_matches('.');
    let addrs = tokio::net::lookup_host((root, 0))
        .await
        .with_context(|| format!("Failed to resolve zone root '{}'", root))?;

    let ip = first_ipv4(addrs.map(|addr| addr.ip()))
        .with_context(|| format!("Zone root '{}' has no IPv4 address; set zone.ip", root))?;

    info!(root, ip = %ip, "Advertised address discovered from zone root");
    Ok(ip)
}

fn first_ipv4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_ipv4_skips_ipv6() {
        let addrs = [
            "::1".parse::<IpAddr>().unwrap(),
            "10.0.0.1".parse().unwrap(),
            "10.0.0.2".parse().unwrap(),
        ];
        assert_eq!(first_ipv4(addrs), Some(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(first_ipv4(["::1".parse::<IpAddr>().unwrap()]), None);
    }

    #[tokio::test]
    async fn test_configured_ip_wins() {
        let zone = ZoneConfig {
            root: "does-not-resolve.invalid".to_string(),
            ip: Some(Ipv4Addr::new(203, 0, 113, 1)),
            ..ZoneConfig::default()
        };
        assert_eq!(
            resolve_advertised_ip(&zone).await.unwrap(),
            Ipv4Addr::new(203, 0, 113, 1)
        );
    }

    #[tokio::test]
    async fn test_localhost_resolves() {
        let zone = ZoneConfig {
            root: "localhost".to_string(),
            ip: None,
            ..ZoneConfig::default()
        };
        assert!(resolve_advertised_ip(&zone).await.unwrap().is_loopback());
    }
}
