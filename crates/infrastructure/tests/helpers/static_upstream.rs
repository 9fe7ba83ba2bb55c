use async_trait::async_trait;
use rebind_dns_application::ports::UpstreamResolver;
use rebind_dns_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::time::Duration;

/// Upstream with a fixed table. Names that are absent resolve to NXDOMAIN.
#[derive(Default)]
pub struct StaticUpstream {
    table: Mutex<HashMap<String, Vec<Ipv4Addr>>>,
}

impl StaticUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: &str, addresses: Vec<Ipv4Addr>) -> Self {
        self.table
            .lock()
            .unwrap()
            .insert(name.to_string(), addresses);
        self
    }
}

#[async_trait]
impl UpstreamResolver for StaticUpstream {
    async fn resolve_a(&self, name: &str, _timeout: Duration) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.table
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or(DomainError::NxDomain)
    }
}
