use rebind_dns_application::services::{ClientStateTable, ZoneStore};
use rebind_dns_application::use_cases::RebindNameResolver;
use rebind_dns_domain::{Config, ZoneSettings};
use rebind_dns_infrastructure::dns::{DnsForwarder, DnsQueryHandler};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub clients: Arc<ClientStateTable>,
    pub handler: Arc<DnsQueryHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, advertised_ip: Ipv4Addr) -> anyhow::Result<Self> {
        let settings =
            ZoneSettings::from_config(&config.zone, advertised_ip, chrono::Utc::now().date_naive())?;
        let zone = Arc::new(ZoneStore::new(&settings));
        let clients = Arc::new(ClientStateTable::new());

        let upstream_addr = config.upstream.socket_addr()?;
        let forwarder = Arc::new(DnsForwarder::new(upstream_addr));

        let resolver = Arc::new(RebindNameResolver::new(
            zone,
            Arc::clone(&clients),
            forwarder,
            config.upstream.query_timeout(),
        ));

        info!(
            root = %settings.root,
            ip = %settings.ip,
            ttl = settings.ttl,
            serial = settings.serial,
            upstream = %upstream_addr,
            "DNS services initialized"
        );

        Ok(Self {
            clients,
            handler: Arc::new(DnsQueryHandler::new(resolver)),
        })
    }
}
