use async_trait::async_trait;
use rebind_dns_application::ports::UpstreamResolver;
use rebind_dns_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

/// Canned upstream answers keyed by name. Unknown names resolve to NXDOMAIN.
pub struct MockUpstreamResolver {
    responses: RwLock<HashMap<String, Result<Vec<Ipv4Addr>, DomainError>>>,
    delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            delay: RwLock::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_response(&self, name: &str, addresses: Vec<Ipv4Addr>) {
        self.responses
            .write()
            .unwrap()
            .insert(name.to_string(), Ok(addresses));
    }

    pub fn set_error(&self, name: &str, error: DomainError) {
        self.responses
            .write()
            .unwrap()
            .insert(name.to_string(), Err(error));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockUpstreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve_a(
        &self,
        name: &str,
        _timeout: Duration,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(Err(DomainError::NxDomain))
    }
}
