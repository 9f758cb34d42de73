//! Error types for transaction assembly and contract verification

use crate::contract::Rule;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// One of the contract rules rejected the transaction. Displays as the
    /// bare reason so callers can match on it.
    #[error("{message}")]
    RuleViolation { rule: Rule, message: String },

    #[error("Malformed transaction: {reason}")]
    MalformedTransaction { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ContractError {
    pub(crate) fn violation(rule: Rule, message: impl Into<String>) -> Self {
        ContractError::RuleViolation {
            rule,
            message: message.into(),
        }
    }

    /// Human-readable failure reason
    pub fn reason(&self) -> String {
        match self {
            ContractError::RuleViolation { message, .. } => message.clone(),
            ContractError::MalformedTransaction { reason } => reason.clone(),
            ContractError::Serialization(e) => e.clone(),
        }
    }

    /// The violated rule, if this is a rule violation
    pub fn rule(&self) -> Option<Rule> {
        match self {
            ContractError::RuleViolation { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}
