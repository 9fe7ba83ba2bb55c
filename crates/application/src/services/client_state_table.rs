use dashmap::DashMap;
use rebind_dns_domain::{RebindOp, RebindState};
use std::sync::Arc;
use tracing::debug;

/// Rebinding state per client identifier.
///
/// Identifiers are opaque and case-sensitive. An entry only comes into existence when an
/// op token is applied, and entries are never evicted for the life of the process.
#[derive(Debug, Default)]
pub struct ClientStateTable {
    states: DashMap<Arc<str>, RebindState>,
}

impl ClientStateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored state, or `Normal` for a client that has never sent an op. Never inserts.
    pub fn get_or_default(&self, client_id: &str) -> RebindState {
        self.states
            .get(client_id)
            .map(|entry| *entry.value())
            .unwrap_or_default()
    }

    /// Applies a raw op token. Tokens other than `N`/`R` (any case) are ignored and
    /// `None` is returned.
    pub fn apply_op(&self, client_id: &str, op_token: &str) -> Option<RebindState> {
        let Some(op) = RebindOp::parse(op_token) else {
            debug!(client_id, op = op_token, "Ignoring unknown rebind op");
            return None;
        };
        Some(self.apply(client_id, op))
    }

    pub fn apply(&self, client_id: &str, op: RebindOp) -> RebindState {
        let state = op.target_state();
        match self.states.get_mut(client_id) {
            Some(mut entry) => *entry = state,
            None => {
                self.states.insert(Arc::from(client_id), state);
            }
        }
        state
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_default_does_not_insert() {
        let table = ClientStateTable::new();
        assert_eq!(table.get_or_default("abc"), RebindState::Normal);
        assert!(table.is_empty());
    }

    #[test]
    fn test_apply_op_creates_entry() {
        let table = ClientStateTable::new();
        assert_eq!(table.apply_op("abc", "r"), Some(RebindState::Rebind));
        assert_eq!(table.get_or_default("abc"), RebindState::Rebind);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_op_is_ignored() {
        let table = ClientStateTable::new();
        table.apply_op("abc", "R");
        assert_eq!(table.apply_op("abc", "X"), None);
        assert_eq!(table.get_or_default("abc"), RebindState::Rebind);

        assert_eq!(table.apply_op("fresh", "zz"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_client_ids_are_case_sensitive() {
        let table = ClientStateTable::new();
        table.apply_op("Client", "R");
        assert_eq!(table.get_or_default("Client"), RebindState::Rebind);
        assert_eq!(table.get_or_default("client"), RebindState::Normal);
    }
}
