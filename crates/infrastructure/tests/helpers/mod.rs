#![allow(dead_code)]

pub mod dns_server_mock;
pub mod static_upstream;

pub use dns_server_mock::{MockBehavior, MockDnsServer};
pub use static_upstream::StaticUpstream;

use rebind_dns_application::services::{ClientStateTable, ZoneStore};
use rebind_dns_application::use_cases::RebindNameResolver;
use rebind_dns_domain::ZoneSettings;
use rebind_dns_infrastructure::dns::DnsQueryHandler;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

pub const ROOT: &str = "rebind.example";
pub const ZONE_IP: Ipv4Addr = Ipv4Addr::new(198, 51, 100, 10);
pub const ZONE_TTL: u32 = 60;
pub const SERIAL: u32 = 202403071;

pub fn handler_with(upstream: Arc<StaticUpstream>) -> (DnsQueryHandler, Arc<ClientStateTable>) {
    let settings = ZoneSettings::new(ROOT, ZONE_IP, ZONE_TTL, SERIAL);
    let zone = Arc::new(ZoneStore::new(&settings));
    let clients = Arc::new(ClientStateTable::new());
    let resolver = RebindNameResolver::new(
        zone,
        Arc::clone(&clients),
        upstream,
        Duration::from_millis(500),
    );
    (DnsQueryHandler::new(Arc::new(resolver)), clients)
}
