//! Yo states and their ledger references

use crate::{PartyId, SecureHash, DEFAULT_PAYLOAD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Yo sent from one party to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YoState {
    sender: PartyId,
    recipient: PartyId,
    payload: String,
}

impl YoState {
    /// Create a Yo carrying the default payload
    pub fn new(sender: PartyId, recipient: PartyId) -> Self {
        Self::with_payload(sender, recipient, DEFAULT_PAYLOAD)
    }

    pub fn with_payload(sender: PartyId, recipient: PartyId, payload: impl Into<String>) -> Self {
        Self {
            sender,
            recipient,
            payload: payload.into(),
        }
    }

    pub fn sender(&self) -> &PartyId {
        &self.sender
    }

    pub fn recipient(&self) -> &PartyId {
        &self.recipient
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Parties that see this state in their vault
    pub fn participants(&self) -> Vec<&PartyId> {
        vec![&self.recipient]
    }
}

impl fmt::Display for YoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.payload)
    }
}

/// Ledger identity of a state: the producing transaction and output index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateRef {
    pub tx_id: SecureHash,
    pub index: u32,
}

impl StateRef {
    pub fn new(tx_id: SecureHash, index: u32) -> Self {
        Self { tx_id, index }
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.tx_id, self.index)
    }
}

/// A state together with its reference on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAndRef {
    pub state: YoState,
    pub reference: StateRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::test_identities::{alice, bob};

    #[test]
    fn test_default_payload() {
        let yo = YoState::new(alice(), bob());
        assert_eq!(yo.payload(), "Yo!");
        assert_eq!(yo.to_string(), "Alice: Yo!");
    }

    #[test]
    fn test_structural_equality() {
        let a = YoState::new(alice(), bob());
        let b = YoState::with_payload(alice(), bob(), "Yo!");
        assert_eq!(a, b);
        assert_ne!(a, YoState::with_payload(alice(), bob(), "Hey"));
    }

    #[test]
    fn test_participants_is_recipient() {
        let yo = YoState::new(alice(), bob());
        assert_eq!(yo.participants(), vec![&bob()]);
    }
}
