use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Framing error: {0}")]
    Framing(String),

    #[error("Invalid zone serial: {0}")]
    InvalidSerial(String),

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("I/O error: {0}")]
    IoError(String),
}
