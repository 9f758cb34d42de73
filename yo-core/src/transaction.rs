//! Transactions and the builder that assembles them

use crate::{Command, ContractError, PartyId, Result, StateAndRef, StateRef, YoState, YO_VERSION};
use rand::{thread_rng, RngCore};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::collections::BTreeSet;
use std::fmt;

/// SHA3-256 digest identifying a transaction
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SecureHash([u8; 32]);

impl SecureHash {
    pub fn sha3_256(data: &[u8]) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(data);
        SecureHash(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureHash({})", self)
    }
}

impl fmt::Display for SecureHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// An immutable bundle of consumed states, produced states, commands and
/// signatures. Only [`TransactionBuilder`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: SecureHash,
    privacy_salt: [u8; 32],
    inputs: Vec<StateAndRef>,
    outputs: Vec<YoState>,
    commands: Vec<Command>,
    signatures: BTreeSet<PartyId>,
}

/// Content covered by the transaction id (signatures excluded). The salt
/// keeps ids of otherwise identical transactions apart.
#[derive(Serialize)]
struct TransactionContent<'a> {
    version: &'a str,
    privacy_salt: &'a [u8; 32],
    inputs: &'a [StateAndRef],
    outputs: &'a [YoState],
    commands: &'a [Command],
}

impl Transaction {
    pub fn id(&self) -> SecureHash {
        self.id
    }

    pub fn inputs(&self) -> &[StateAndRef] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[YoState] {
        &self.outputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn signatures(&self) -> &BTreeSet<PartyId> {
        &self.signatures
    }

    /// Reference to output `index`, for use as an input elsewhere
    pub fn out_ref(&self, index: usize) -> Option<StateAndRef> {
        let state = self.outputs.get(index)?.clone();
        let index = u32::try_from(index).ok()?;
        Some(StateAndRef {
            state,
            reference: StateRef::new(self.id, index),
        })
    }

    /// All outputs paired with their references
    pub fn out_refs(&self) -> Vec<StateAndRef> {
        (0..self.outputs.len())
            .filter_map(|i| self.out_ref(i))
            .collect()
    }

    /// Whether some signature was made with the key of `party`
    pub fn is_signed_by(&self, party: &PartyId) -> bool {
        self.signatures.iter().any(|s| s.owns_key_of(party))
    }

    pub fn privacy_salt(&self) -> &[u8; 32] {
        &self.privacy_salt
    }

    fn compute_id(
        privacy_salt: &[u8; 32],
        inputs: &[StateAndRef],
        outputs: &[YoState],
        commands: &[Command],
    ) -> Result<SecureHash> {
        let content = TransactionContent {
            version: YO_VERSION,
            privacy_salt,
            inputs,
            outputs,
            commands,
        };
        let bytes = serde_json::to_vec(&content)
            .map_err(|e| ContractError::Serialization(e.to_string()))?;
        Ok(SecureHash::sha3_256(&bytes))
    }
}

/// Accumulates the parts of a transaction. Business rules are left to the
/// contract; [`build`](TransactionBuilder::build) only checks structure.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<StateAndRef>,
    outputs: Vec<YoState>,
    commands: Vec<Command>,
    signatures: BTreeSet<PartyId>,
    privacy_salt: Option<[u8; 32]>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, input: StateAndRef) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn output(mut self, output: YoState) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn sign(mut self, party: PartyId) -> Self {
        self.signatures.insert(party);
        self
    }

    /// Pin the privacy salt instead of drawing a random one
    pub fn salt(mut self, privacy_salt: [u8; 32]) -> Self {
        self.privacy_salt = Some(privacy_salt);
        self
    }

    /// Freeze the builder into a transaction.
    ///
    /// Fails with [`ContractError::MalformedTransaction`] when a signature
    /// belongs to a party that no command requires.
    pub fn build(self) -> Result<Transaction> {
        for signer in &self.signatures {
            if !self.commands.iter().any(|c| c.requires_key_of(signer)) {
                return Err(ContractError::MalformedTransaction {
                    reason: format!("signature by {} is not required by any command", signer),
                });
            }
        }

        let privacy_salt = self.privacy_salt.unwrap_or_else(|| {
            let mut salt = [0u8; 32];
            thread_rng().fill_bytes(&mut salt);
            salt
        });
        let id = Transaction::compute_id(&privacy_salt, &self.inputs, &self.outputs, &self.commands)?;

        Ok(Transaction {
            id,
            privacy_salt,
            inputs: self.inputs,
            outputs: self.outputs,
            commands: self.commands,
            signatures: self.signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::test_identities::{alice, bob, mini_corp};

    fn yo_tx() -> Transaction {
        TransactionBuilder::new()
            .output(YoState::new(alice(), bob()))
            .command(Command::send([alice()]))
            .sign(alice())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_valid_transaction() {
        let tx = yo_tx();
        assert!(tx.inputs().is_empty());
        assert_eq!(tx.outputs().len(), 1);
        assert_eq!(tx.commands().len(), 1);
        assert!(tx.is_signed_by(&alice()));
        assert!(!tx.is_signed_by(&bob()));
    }

    fn salted(payload: &str, salt: [u8; 32]) -> Transaction {
        TransactionBuilder::new()
            .output(YoState::with_payload(alice(), bob(), payload))
            .command(Command::send([alice()]))
            .sign(alice())
            .salt(salt)
            .build()
            .unwrap()
    }

    #[test]
    fn test_identical_content_gets_distinct_ids() {
        let first = yo_tx();
        let second = yo_tx();
        assert_eq!(first.outputs(), second.outputs());
        assert_ne!(first.privacy_salt(), second.privacy_salt());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_id_is_derived_from_salt_and_content() {
        assert_eq!(salted("Yo!", [7; 32]).id(), salted("Yo!", [7; 32]).id());
        assert_ne!(salted("Yo!", [7; 32]).id(), salted("Hey", [7; 32]).id());
        assert_ne!(salted("Yo!", [7; 32]).id(), salted("Yo!", [8; 32]).id());
    }

    #[test]
    fn test_stray_signature_is_malformed() {
        let result = TransactionBuilder::new()
            .output(YoState::new(alice(), bob()))
            .command(Command::send([alice()]))
            .sign(alice())
            .sign(mini_corp())
            .build();

        match result {
            Err(ContractError::MalformedTransaction { reason }) => {
                assert!(reason.contains("MiniCorp"));
            }
            other => panic!("expected malformed transaction, got {:?}", other),
        }
    }

    #[test]
    fn test_signature_without_commands_is_malformed() {
        let result = TransactionBuilder::new()
            .output(YoState::new(alice(), bob()))
            .sign(alice())
            .build();
        assert!(matches!(result, Err(ContractError::MalformedTransaction { .. })));
    }

    #[test]
    fn test_out_refs() {
        let tx = yo_tx();
        let out = tx.out_ref(0).unwrap();
        assert_eq!(out.reference, StateRef::new(tx.id(), 0));
        assert_eq!(out.state, YoState::new(alice(), bob()));
        assert!(tx.out_ref(1).is_none());
        assert_eq!(tx.out_refs().len(), 1);
    }
}
