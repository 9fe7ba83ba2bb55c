use super::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: Arc<str>,
    pub rname: Arc<str>,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    MX { preference: u16, exchange: Arc<str> },
    NS(Arc<str>),
    CNAME(Arc<str>),
    SOA(SoaData),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::MX { .. } => RecordType::MX,
            RecordData::NS(_) => RecordType::NS,
            RecordData::CNAME(_) => RecordType::CNAME,
            RecordData::SOA(_) => RecordType::SOA,
        }
    }
}

/// A resource record owned by `name`, which is kept exactly as it should appear on the wire
/// minus the trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: Arc<str>,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<Arc<str>>, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<Arc<str>>, ttl: u32, address: Ipv4Addr) -> Self {
        Self::new(name, ttl, RecordData::A(address))
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}
