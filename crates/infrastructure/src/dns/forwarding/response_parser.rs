use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use rebind_dns_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub addresses: Vec<IpAddr>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let mut addresses = Vec::new();

        for record in message.answers() {
            match record.data() {
                Some(RData::A(a)) => addresses.push(IpAddr::V4(a.0)),
                Some(RData::AAAA(aaaa)) => addresses.push(IpAddr::V6(aaaa.0)),
                _ => {}
            }
        }

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            addresses,
            rcode,
            truncated,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
