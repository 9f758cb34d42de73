//! Yo Core - state model and contract for the Yo ledger
//!
//! This crate provides the value types recorded by the ledger (parties, Yo
//! states, commands and transactions), a builder that assembles structurally
//! valid transactions, and the Yo contract that decides whether a transaction
//! may be committed.

pub mod command;
pub mod contract;
pub mod error;
pub mod party;
pub mod state;
pub mod transaction;

pub use command::{Command, CommandKind};
pub use contract::{verify, Contract, Rule, YoContract};
pub use error::ContractError;
pub use party::{PartyId, PublicKey};
pub use state::{StateAndRef, StateRef, YoState};
pub use transaction::{SecureHash, Transaction, TransactionBuilder};

/// Result type for contract and transaction operations
pub type Result<T> = std::result::Result<T, ContractError>;

/// Payload carried by a Yo unless another one is given
pub const DEFAULT_PAYLOAD: &str = "Yo!";

/// Yo ledger protocol version
pub const YO_VERSION: &str = "0.1.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!YO_VERSION.is_empty());
    }

    #[test]
    fn test_default_payload() {
        assert_eq!(DEFAULT_PAYLOAD, "Yo!");
    }
}
