//! Builds upstream query messages in wire format using `hickory-proto`.

use crate::dns::record_mapper::RecordMapper;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use rebind_dns_domain::{DomainError, RecordType};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query with a random ID and return the ID alongside the bytes
    /// so the response can be matched.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = RecordMapper::to_name(domain)?;
        let query = Query::query(name, RecordMapper::record_type_to_hickory(*record_type));

        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        let bytes = message.to_vec().map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;
        Ok((id, bytes))
    }
}
