use async_trait::async_trait;
use rebind_dns_domain::DomainError;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Resolves arbitrary names through a real recursive resolver.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// A records for `name`. Implementations must give up after `timeout`.
    /// NXDOMAIN and transport failures are errors; an empty answer is `Ok(vec![])`.
    async fn resolve_a(&self, name: &str, timeout: Duration) -> Result<Vec<Ipv4Addr>, DomainError>;
}
