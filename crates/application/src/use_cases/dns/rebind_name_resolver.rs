use crate::ports::UpstreamResolver;
use crate::services::{ClientStateTable, ZoneStore};
use rebind_dns_domain::{DnsAnswer, DnsQuery, DnsRecord, QueryTarget, RebindState, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// TTL for every answer on the rebind path, short so a flipped client takes effect fast.
pub const REBIND_TTL: u32 = 15;

/// Decides the record sections for a query against the zone and the per-client state.
pub struct RebindNameResolver {
    zone: Arc<ZoneStore>,
    clients: Arc<ClientStateTable>,
    upstream: Arc<dyn UpstreamResolver>,
    upstream_timeout: Duration,
}

impl RebindNameResolver {
    pub fn new(
        zone: Arc<ZoneStore>,
        clients: Arc<ClientStateTable>,
        upstream: Arc<dyn UpstreamResolver>,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            zone,
            clients,
            upstream,
            upstream_timeout,
        }
    }

    /// Never fails: names outside the zone and failed upstream lookups both produce an
    /// empty answer.
    pub async fn execute(&self, query: &DnsQuery) -> DnsAnswer {
        let qname: &str = &query.domain;

        if let Some(answers) = self.zone.lookup(qname, query.record_type) {
            return self.zone_answer(answers, query.record_type);
        }

        match QueryTarget::classify(qname, self.zone.root()) {
            QueryTarget::OutsideZone => {
                debug!(domain = %qname, "Name outside zone, empty answer");
                DnsAnswer::empty()
            }
            QueryTarget::Subdomain(label) => {
                debug!(domain = %qname, label, "Bare subdomain, not rebound");
                DnsAnswer::with_answers(vec![DnsRecord::a(
                    Arc::clone(&query.domain),
                    self.zone.ttl(),
                    self.zone.ip(),
                )])
            }
            QueryTarget::Rebind {
                target,
                client_id,
                op_token,
            } => {
                if let Some(op_token) = op_token {
                    self.clients.apply_op(client_id, op_token);
                }
                let state = self.clients.get_or_default(client_id);
                debug!(
                    domain = %qname,
                    client_id,
                    state = %state,
                    tracked_clients = self.clients.len(),
                    "Rebind query"
                );

                match state {
                    RebindState::Normal => DnsAnswer::with_answers(vec![DnsRecord::a(
                        Arc::clone(&query.domain),
                        REBIND_TTL,
                        self.zone.ip(),
                    )]),
                    RebindState::Rebind => self.rebound_answer(&query.domain, target).await,
                }
            }
        }
    }

    fn zone_answer(&self, answers: Vec<DnsRecord>, qtype: RecordType) -> DnsAnswer {
        if qtype != RecordType::ANY {
            return DnsAnswer::with_answers(answers);
        }

        DnsAnswer {
            answers,
            authority: vec![self.zone.soa_record().clone()],
            additional: self.zone.ns_records().to_vec(),
        }
    }

    async fn rebound_answer(&self, qname: &Arc<str>, target: &str) -> DnsAnswer {
        debug!(target, "Looking up rebind target upstream");

        let lookup = tokio::time::timeout(
            self.upstream_timeout,
            self.upstream.resolve_a(target, self.upstream_timeout),
        )
        .await;

        let addresses = match lookup {
            Ok(Ok(addresses)) => addresses,
            Ok(Err(e)) => {
                warn!(target, error = %e, "Upstream lookup failed, empty answer");
                return DnsAnswer::empty();
            }
            Err(_) => {
                warn!(
                    target,
                    timeout_ms = self.upstream_timeout.as_millis() as u64,
                    "Upstream lookup timed out, empty answer"
                );
                return DnsAnswer::empty();
            }
        };

        DnsAnswer::with_answers(
            addresses
                .into_iter()
                .map(|address| DnsRecord::a(Arc::clone(qname), REBIND_TTL, address))
                .collect(),
        )
    }
}
