use crate::dns::record_mapper::RecordMapper;
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use rebind_dns_application::use_cases::RebindNameResolver;
use rebind_dns_domain::{DnsAnswer, DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Turns raw request bytes into raw response bytes. Transport agnostic: the UDP and
/// TCP listeners both hand the payload they received to [`DnsQueryHandler::handle`].
pub struct DnsQueryHandler {
    resolver: Arc<RebindNameResolver>,
}

impl DnsQueryHandler {
    pub fn new(resolver: Arc<RebindNameResolver>) -> Self {
        Self { resolver }
    }

    /// Returns `None` when nothing should be sent back: the request could not be
    /// decoded, it carried no question, or the response could not be encoded.
    pub async fn handle(
        &self,
        request_bytes: &[u8],
        peer: SocketAddr,
        transport: &'static str,
    ) -> Option<Vec<u8>> {
        trace!(client = %peer, transport, bytes = %hex_dump(request_bytes), "Request");

        let request = match Message::from_vec(request_bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %peer, transport, error = %e, "Dropping undecodable request");
                return None;
            }
        };

        let Some(question) = request.queries().first() else {
            warn!(client = %peer, transport, id = request.id(), "Dropping request without a question");
            return None;
        };

        let name = question.name().to_ascii();
        let domain = normalize_domain(&name);
        let record_type = RecordMapper::record_type_from_hickory(question.query_type());

        info!(
            domain = %domain,
            record_type = %record_type,
            client = %peer,
            transport,
            "DNS query received"
        );

        let answer = self
            .resolver
            .execute(&DnsQuery::new(domain, record_type))
            .await;

        debug!(
            domain = %domain,
            answers = answer.answers.len(),
            authority = answer.authority.len(),
            additional = answer.additional.len(),
            "Sending response"
        );

        let response_bytes =
            match build_response(&request, question, &answer).and_then(|response| {
                response.to_vec().map_err(|e| {
                    DomainError::InvalidDnsMessage(format!("Failed to encode response: {}", e))
                })
            }) {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(domain = %domain, error = %e, "Failed to build response");
                    return None;
                }
            };

        trace!(client = %peer, transport, bytes = %hex_dump(&response_bytes), "Response");
        Some(response_bytes)
    }
}

/// Strips exactly one trailing dot. Case is left as received.
fn normalize_domain(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

fn build_response(
    request: &Message,
    question: &Query,
    answer: &DnsAnswer,
) -> Result<Message, DomainError> {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_authoritative(true)
        .set_recursion_available(true)
        .set_response_code(ResponseCode::NoError);

    response.add_query(question.clone());
    response.add_answers(RecordMapper::to_hickory_all(&answer.answers)?);
    response.add_name_servers(RecordMapper::to_hickory_all(&answer.authority)?);
    response.add_additionals(RecordMapper::to_hickory_all(&answer.additional)?);

    Ok(response)
}

/// Space separated byte pairs, the layout of a pcap text dump without the offset column.
fn hex_dump(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, pair) in encoded.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(char::from(pair[0]));
        out.push(char::from(pair[1]));
    }
    out
}
