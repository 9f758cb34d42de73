//! A simulated participant

use crate::Vault;
use std::collections::BTreeMap;
use yo_core::{PartyId, SecureHash, Transaction};

/// One participant: its identity, its vault of live states and the
/// transactions it has validated
#[derive(Debug, Clone)]
pub struct MockNode {
    identity: PartyId,
    vault: Vault,
    transactions: BTreeMap<SecureHash, Transaction>,
}

impl MockNode {
    pub(crate) fn new(identity: PartyId) -> Self {
        Self {
            identity,
            vault: Vault::new(),
            transactions: BTreeMap::new(),
        }
    }

    /// Legal identity of this node
    pub fn identity(&self) -> &PartyId {
        &self.identity
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub(crate) fn vault_mut(&mut self) -> &mut Vault {
        &mut self.vault
    }

    /// A validated transaction this node took part in
    pub fn transaction(&self, id: &SecureHash) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn record_transaction(&mut self, tx: &Transaction) {
        self.transactions.insert(tx.id(), tx.clone());
    }
}
