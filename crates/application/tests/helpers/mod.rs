#![allow(dead_code)]

mod mock_upstream;

pub use mock_upstream::MockUpstreamResolver;

use rebind_dns_application::services::{ClientStateTable, ZoneStore};
use rebind_dns_application::use_cases::RebindNameResolver;
use rebind_dns_domain::ZoneSettings;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

pub const ROOT: &str = "rebind.example";
pub const ZONE_IP: Ipv4Addr = Ipv4Addr::new(198, 51, 100, 10);
pub const ZONE_TTL: u32 = 60;
pub const SERIAL: u32 = 202403071;

pub fn zone_settings() -> ZoneSettings {
    ZoneSettings::new(ROOT, ZONE_IP, ZONE_TTL, SERIAL)
}

pub fn zone_store() -> Arc<ZoneStore> {
    Arc::new(ZoneStore::new(&zone_settings()))
}

pub struct Fixture {
    pub resolver: RebindNameResolver,
    pub clients: Arc<ClientStateTable>,
    pub upstream: Arc<MockUpstreamResolver>,
}

pub fn fixture() -> Fixture {
    fixture_with_timeout(Duration::from_millis(500))
}

pub fn fixture_with_timeout(timeout: Duration) -> Fixture {
    let clients = Arc::new(ClientStateTable::new());
    let upstream = Arc::new(MockUpstreamResolver::new());
    let resolver = RebindNameResolver::new(
        zone_store(),
        Arc::clone(&clients),
        upstream.clone(),
        timeout,
    );
    Fixture {
        resolver,
        clients,
        upstream,
    }
}
