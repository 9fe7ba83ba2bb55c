use super::DnsRecord;

/// Record sections produced for one query. The envelope is built by the codec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsAnswer {
    pub answers: Vec<DnsRecord>,
    pub authority: Vec<DnsRecord>,
    pub additional: Vec<DnsRecord>,
}

impl DnsAnswer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_answers(answers: Vec<DnsRecord>) -> Self {
        Self {
            answers,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty() && self.authority.is_empty() && self.additional.is_empty()
    }
}
