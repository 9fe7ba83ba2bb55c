//! Rebind DNS Domain Layer
pub mod config;
pub mod dns_answer;
pub mod dns_query;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod rebind;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_answer::DnsAnswer;
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType, SoaData};
pub use domain_name::DomainName;
pub use errors::DomainError;
pub use rebind::{QueryTarget, RebindOp, RebindState};
pub use zone::{zone_serial, ZoneSettings};
