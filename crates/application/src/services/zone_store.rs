use rebind_dns_domain::{DnsRecord, DomainName, RecordData, RecordType, SoaData, ZoneSettings};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

const SOA_REFRESH: u32 = 60 * 60;
const SOA_RETRY: u32 = 60 * 60 * 3;
const SOA_EXPIRE: u32 = 60 * 60 * 24;
const SOA_MINIMUM: u32 = 60 * 60;
const MX_PREFERENCE: u16 = 10;

/// Static records of the zone, built once and never mutated afterwards.
///
/// Keys are matched exactly (no case folding). Apart from the apex, only `ns1`, `ns2`,
/// `mail` and `hostmaster` exist; the NS and MX targets must not be CNAMEs (RFC 2181
/// section 10.3), so they carry the zone address directly.
#[derive(Debug)]
pub struct ZoneStore {
    root: DomainName,
    ip: Ipv4Addr,
    ttl: u32,
    records: HashMap<Arc<str>, Vec<DnsRecord>>,
    ns_records: Vec<DnsRecord>,
    soa_record: DnsRecord,
}

impl ZoneStore {
    pub fn new(settings: &ZoneSettings) -> Self {
        let root = settings.root.clone();
        let ttl = settings.ttl;
        let ip = settings.ip;

        let ns1 = root.child("ns1");
        let ns2 = root.child("ns2");
        let mail = root.child("mail");
        let hostmaster = root.child("hostmaster");

        let soa_record = DnsRecord::new(
            root.as_arc(),
            ttl,
            RecordData::SOA(SoaData {
                mname: ns1.as_arc(),
                rname: hostmaster.as_arc(),
                serial: settings.serial,
                refresh: SOA_REFRESH,
                retry: SOA_RETRY,
                expire: SOA_EXPIRE,
                minimum: SOA_MINIMUM,
            }),
        );

        let ns_records = vec![
            DnsRecord::new(root.as_arc(), ttl, RecordData::NS(ns1.as_arc())),
            DnsRecord::new(root.as_arc(), ttl, RecordData::NS(ns2.as_arc())),
        ];

        let mut apex = vec![
            DnsRecord::a(root.as_arc(), ttl, ip),
            DnsRecord::new(root.as_arc(), ttl, RecordData::AAAA(Ipv6Addr::UNSPECIFIED)),
            DnsRecord::new(
                root.as_arc(),
                ttl,
                RecordData::MX {
                    preference: MX_PREFERENCE,
                    exchange: mail.as_arc(),
                },
            ),
            soa_record.clone(),
        ];
        apex.extend(ns_records.iter().cloned());

        let mut records = HashMap::with_capacity(5);
        records.insert(root.as_arc(), apex);
        for host in [&ns1, &ns2, &mail] {
            records.insert(host.as_arc(), vec![DnsRecord::a(host.as_arc(), ttl, ip)]);
        }
        records.insert(
            hostmaster.as_arc(),
            vec![DnsRecord::new(
                hostmaster.as_arc(),
                ttl,
                RecordData::CNAME(root.as_arc()),
            )],
        );

        Self {
            root,
            ip,
            ttl,
            records,
            ns_records,
            soa_record,
        }
    }

    /// Records stored under exactly `name` whose type answers `qtype`, in zone order.
    /// `None` when `name` is not a zone name at all.
    pub fn lookup(&self, name: &str, qtype: RecordType) -> Option<Vec<DnsRecord>> {
        self.records.get(name).map(|records| {
            records
                .iter()
                .filter(|record| qtype.matches(record.record_type()))
                .cloned()
                .collect()
        })
    }

    pub fn ns_records(&self) -> &[DnsRecord] {
        &self.ns_records
    }

    pub fn soa_record(&self) -> &DnsRecord {
        &self.soa_record
    }

    pub fn root(&self) -> &DomainName {
        &self.root
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }
}
