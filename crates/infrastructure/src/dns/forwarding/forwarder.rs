use super::message_builder::MessageBuilder;
use super::response_parser::{DnsResponse, ResponseParser};
use crate::dns::transport::{DnsTransport, TcpTransport, UdpTransport};
use async_trait::async_trait;
use rebind_dns_application::ports::UpstreamResolver;
use rebind_dns_domain::{DomainError, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Sends queries to a single recursive resolver, over UDP first and TCP when
/// the UDP answer comes back truncated.
pub struct DnsForwarder {
    server_addr: SocketAddr,
    udp: UdpTransport,
    tcp: TcpTransport,
}

impl DnsForwarder {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            udp: UdpTransport::new(server_addr),
            tcp: TcpTransport::new(server_addr),
        }
    }

    pub async fn query(
        &self,
        domain: &str,
        record_type: &RecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, DomainError> {
        let (id, request_bytes) = MessageBuilder::build_query_with_id(domain, record_type)?;

        let mut response = self.udp.send(&request_bytes, timeout).await?;
        let mut parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.truncated {
            debug!(
                server = %self.server_addr,
                domain = %domain,
                "Truncated UDP response, retrying over {}",
                self.tcp.protocol_name()
            );
            response = self.tcp.send(&request_bytes, timeout).await?;
            parsed = ResponseParser::parse(&response.bytes)?;
        }

        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                parsed.id, id
            )));
        }

        debug!(
            server = %self.server_addr,
            domain = %domain,
            protocol = response.protocol_used,
            addresses = parsed.addresses.len(),
            "Upstream answered"
        );

        Ok(parsed)
    }
}

#[async_trait]
impl UpstreamResolver for DnsForwarder {
    async fn resolve_a(&self, name: &str, timeout: Duration) -> Result<Vec<Ipv4Addr>, DomainError> {
        let response = self.query(name, &RecordType::A, timeout).await?;

        if response.is_nxdomain() {
            return Err(DomainError::NxDomain);
        }
        if response.is_server_error() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} answered {}",
                self.server_addr,
                ResponseParser::rcode_to_status(response.rcode)
            )));
        }

        Ok(response
            .addresses
            .into_iter()
            .filter_map(|address| match address {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .collect())
    }
}
