use std::fmt;
use std::sync::Arc;

/// A dot-separated name without its trailing dot. Case is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(Arc<str>);

impl DomainName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.strip_suffix('.').unwrap_or(name)))
    }

    /// `label.self`
    pub fn child(&self, label: &str) -> Self {
        Self(Arc::from(format!("{}.{}", label, self.0)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_arc(&self) -> Arc<str> {
        Arc::clone(&self.0)
    }

    /// Returns what precedes `.self` in `name`, or `None` when `name` is not a proper
    /// subdomain. Comparison is exact and case-sensitive.
    pub fn strip_from<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.as_str())?.strip_suffix('.')
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
