//! Per-participant store of live states

use std::collections::BTreeMap;
use yo_core::{StateAndRef, StateRef, YoState};

/// Live states visible to one participant, keyed by ledger reference.
/// Iteration follows `StateRef` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vault {
    states: BTreeMap<StateRef, YoState>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, state: StateAndRef) {
        self.states.insert(state.reference, state.state);
    }

    pub(crate) fn remove(&mut self, reference: &StateRef) -> Option<YoState> {
        self.states.remove(reference)
    }

    pub fn get(&self, reference: &StateRef) -> Option<&YoState> {
        self.states.get(reference)
    }

    pub fn contains(&self, reference: &StateRef) -> bool {
        self.states.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Every state with its reference
    pub fn states(&self) -> Vec<StateAndRef> {
        self.query_refs(|_| true)
    }

    /// States matching `predicate`
    pub fn query<P>(&self, predicate: P) -> Vec<YoState>
    where
        P: Fn(&YoState) -> bool,
    {
        self.states
            .values()
            .filter(|state| predicate(state))
            .cloned()
            .collect()
    }

    /// States matching `predicate`, with references
    pub fn query_refs<P>(&self, predicate: P) -> Vec<StateAndRef>
    where
        P: Fn(&YoState) -> bool,
    {
        self.states
            .iter()
            .filter(|(_, state)| predicate(state))
            .map(|(reference, state)| StateAndRef {
                state: state.clone(),
                reference: *reference,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yo_core::party::test_identities::{alice, bob};
    use yo_core::SecureHash;

    fn entry(index: u32, payload: &str) -> StateAndRef {
        StateAndRef {
            state: YoState::with_payload(alice(), bob(), payload),
            reference: StateRef::new(SecureHash::sha3_256(b"tx"), index),
        }
    }

    #[test]
    fn test_insert_query_remove() {
        let mut vault = Vault::new();
        vault.insert(entry(1, "Hey"));
        vault.insert(entry(0, "Yo!"));
        assert_eq!(vault.len(), 2);

        let yos = vault.query(|s| s.payload() == "Yo!");
        assert_eq!(yos, vec![YoState::new(alice(), bob())]);

        let refs: Vec<u32> = vault.states().iter().map(|s| s.reference.index).collect();
        assert_eq!(refs, vec![0, 1]);

        let removed = vault.remove(&entry(0, "Yo!").reference);
        assert!(removed.is_some());
        assert!(vault.query(|s| s.payload() == "Yo!").is_empty());
        assert!(!vault.is_empty());
    }
}
