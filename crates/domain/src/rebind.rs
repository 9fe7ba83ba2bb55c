//! Label grammar of the rebinding sub-path and the per-client state it drives.
//!
//! Names under the zone root take one of two shapes:
//!
//! * `<label>.<root>`: a bare subdomain, always answered with the zone address.
//! * `<target>.<segment>.<root>`: `segment` is either `<op>-<client>` or `<client>`,
//!   and `target` (which may contain dots) is what a rebound client resolves to.

use crate::DomainName;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebindState {
    /// Answer with the zone address.
    #[default]
    Normal,
    /// Answer with whatever the target resolves to upstream.
    Rebind,
}

impl RebindState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rebind => "rebind",
        }
    }
}

impl fmt::Display for RebindState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindOp {
    Normal,
    Rebind,
}

impl RebindOp {
    /// `N` or `R`, case-insensitive. Any other token is not an op.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("N") {
            Some(Self::Normal)
        } else if token.eq_ignore_ascii_case("R") {
            Some(Self::Rebind)
        } else {
            None
        }
    }

    pub fn target_state(&self) -> RebindState {
        match self {
            Self::Normal => RebindState::Normal,
            Self::Rebind => RebindState::Rebind,
        }
    }
}

/// Where a query name falls relative to the zone root. Exact zone names are matched
/// before classification and never reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTarget<'a> {
    OutsideZone,
    Subdomain(&'a str),
    Rebind {
        target: &'a str,
        client_id: &'a str,
        op_token: Option<&'a str>,
    },
}

impl<'a> QueryTarget<'a> {
    pub fn classify(qname: &'a str, root: &DomainName) -> Self {
        let Some(data) = root.strip_from(qname) else {
            return Self::OutsideZone;
        };

        let Some((target, segment)) = data.rsplit_once('.') else {
            return Self::Subdomain(data);
        };

        match segment.split_once('-') {
            Some((op_token, client_id)) => Self::Rebind {
                target,
                client_id,
                op_token: Some(op_token),
            },
            None => Self::Rebind {
                target,
                client_id: segment,
                op_token: None,
            },
        }
    }
}
