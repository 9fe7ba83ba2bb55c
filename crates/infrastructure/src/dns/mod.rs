pub mod forwarding;
pub mod record_mapper;
pub mod server;
pub mod transport;

pub use forwarding::DnsForwarder;
pub use record_mapper::RecordMapper;
pub use server::DnsQueryHandler;
