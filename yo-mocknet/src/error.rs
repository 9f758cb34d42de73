//! Error types for the mock network

use crate::{ProposalId, TransactionStatus};
use yo_core::{ContractError, SecureHash, StateRef};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Contract rejected transaction: {0}")]
    Contract(#[from] ContractError),

    #[error("Double spend: state {state} is already consumed")]
    DoubleSpend { state: StateRef },

    #[error("Unknown input: state {state} was never committed")]
    UnknownInput { state: StateRef },

    #[error("Duplicate transaction: {0}")]
    DuplicateTransaction(SecureHash),

    #[error("Unknown party: {0}")]
    UnknownParty(String),

    #[error("Party already exists: {0}")]
    DuplicateParty(String),

    #[error("Unknown proposal: {0}")]
    UnknownProposal(ProposalId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Network configuration error: {0}")]
    Configuration(String),
}

impl NetworkError {
    /// Whether a corrected resubmission can succeed. Rejections never
    /// change ledger state.
    pub fn is_recoverable(&self) -> bool {
        match self {
            NetworkError::Contract(_) => true,
            NetworkError::UnknownParty(_) => true,
            NetworkError::UnknownInput { .. } => true,
            NetworkError::DoubleSpend { .. } => true,
            NetworkError::DuplicateTransaction(_) => true,
            NetworkError::DuplicateParty(_) => false,
            NetworkError::UnknownProposal(_) => false,
            NetworkError::InvalidTransition { .. } => false,
            NetworkError::Configuration(_) => false,
        }
    }

    pub fn category(&self) -> NetworkErrorCategory {
        match self {
            NetworkError::Contract(_) => NetworkErrorCategory::Contract,
            NetworkError::DoubleSpend { .. }
            | NetworkError::UnknownInput { .. }
            | NetworkError::DuplicateTransaction(_) => NetworkErrorCategory::Ledger,
            NetworkError::UnknownParty(_) | NetworkError::DuplicateParty(_) => {
                NetworkErrorCategory::Party
            }
            NetworkError::UnknownProposal(_) | NetworkError::InvalidTransition { .. } => {
                NetworkErrorCategory::Proposal
            }
            NetworkError::Configuration(_) => NetworkErrorCategory::Configuration,
        }
    }
}

/// Network error categories for handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorCategory {
    Contract,
    Ledger,
    Party,
    Proposal,
    Configuration,
}
