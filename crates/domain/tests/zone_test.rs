use chrono::NaiveDate;
use rebind_dns_domain::config::ZoneConfig;
use rebind_dns_domain::{zone_serial, DomainError, DomainName, ZoneSettings};
use std::net::Ipv4Addr;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[test]
fn test_zone_serial_concatenates_date_and_suffix() {
    assert_eq!(zone_serial(date(), "1").unwrap(), 202403071);
    assert_eq!(zone_serial(date(), "42").unwrap(), 2024030742);
}

#[test]
fn test_zone_serial_rejects_non_digits() {
    assert!(matches!(
        zone_serial(date(), "x"),
        Err(DomainError::InvalidSerial(_))
    ));
    assert!(zone_serial(date(), "").is_err());
}

#[test]
fn test_zone_serial_rejects_overflow() {
    assert!(zone_serial(date(), "100").is_err());
}

#[test]
fn test_zone_settings_from_config() {
    let config = ZoneConfig {
        root: "rebind.example.".to_string(),
        ttl: 120,
        ip: None,
        serial_suffix: "3".to_string(),
    };

    let settings =
        ZoneSettings::from_config(&config, Ipv4Addr::new(198, 51, 100, 1), date()).unwrap();

    assert_eq!(settings.root.as_str(), "rebind.example");
    assert_eq!(settings.ttl, 120);
    assert_eq!(settings.serial, 202403073);
}

#[test]
fn test_domain_name_child() {
    let root = DomainName::new("rebind.example");
    assert_eq!(root.child("ns1").as_str(), "ns1.rebind.example");
    assert_eq!(root.child("hostmaster").to_string(), "hostmaster.rebind.example");
}

#[test]
fn test_domain_name_strip_from() {
    let root = DomainName::new("rebind.example");
    assert_eq!(root.strip_from("a.b.rebind.example"), Some("a.b"));
    assert_eq!(root.strip_from("rebind.example"), None);
    assert_eq!(root.strip_from("xrebind.example"), None);
    assert_eq!(root.strip_from("a.rebind.example.org"), None);
}
