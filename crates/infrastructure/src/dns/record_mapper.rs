//! Conversion between the zone's own record model and `hickory_proto` wire types.

use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType as HickoryRecordType};
use rebind_dns_domain::{DnsRecord, DomainError, RecordData, RecordType};

pub struct RecordMapper;

impl RecordMapper {
    pub fn record_type_from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }

    pub fn record_type_to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Fully-qualified wire name for a dotless name. Case is preserved.
    pub fn to_name(name: &str) -> Result<Name, DomainError> {
        let fqdn = format!("{}.", name.strip_suffix('.').unwrap_or(name));
        Name::from_ascii(&fqdn).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })
    }

    pub fn to_hickory(record: &DnsRecord) -> Result<Record, DomainError> {
        let rdata = match &record.data {
            RecordData::A(address) => RData::A(A(*address)),
            RecordData::AAAA(address) => RData::AAAA(AAAA(*address)),
            RecordData::MX {
                preference,
                exchange,
            } => RData::MX(MX::new(*preference, Self::to_name(exchange)?)),
            RecordData::NS(target) => RData::NS(NS(Self::to_name(target)?)),
            RecordData::CNAME(target) => RData::CNAME(CNAME(Self::to_name(target)?)),
            RecordData::SOA(soa) => RData::SOA(SOA::new(
                Self::to_name(&soa.mname)?,
                Self::to_name(&soa.rname)?,
                soa.serial,
                saturating_i32(soa.refresh),
                saturating_i32(soa.retry),
                saturating_i32(soa.expire),
                soa.minimum,
            )),
        };

        Ok(Record::from_rdata(
            Self::to_name(&record.name)?,
            record.ttl,
            rdata,
        ))
    }

    pub fn to_hickory_all(records: &[DnsRecord]) -> Result<Vec<Record>, DomainError> {
        records.iter().map(Self::to_hickory).collect()
    }
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
