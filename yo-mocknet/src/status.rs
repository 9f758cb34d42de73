//! Lifecycle of a proposal inside the mock network

use crate::{NetworkError, Result};
use std::fmt;

/// `Proposed -> Verified -> Committed`, or `Rejected` from either of the
/// first two. `Committed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Proposed,
    Verified,
    Committed,
    Rejected,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TransactionStatus::Committed | TransactionStatus::Rejected)
    }

    /// Move to `next`, refusing transitions the lifecycle does not allow
    pub fn advance(self, next: TransactionStatus) -> Result<TransactionStatus> {
        use TransactionStatus::*;

        match (self, next) {
            (Proposed, Verified) | (Proposed, Rejected) | (Verified, Committed) | (Verified, Rejected) => {
                Ok(next)
            }
            (from, to) => Err(NetworkError::InvalidTransition { from, to }),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionStatus::Proposed => "proposed",
            TransactionStatus::Verified => "verified",
            TransactionStatus::Committed => "committed",
            TransactionStatus::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionStatus::*;
    use super::*;

    #[test]
    fn test_happy_path() {
        let status = Proposed.advance(Verified).unwrap().advance(Committed).unwrap();
        assert_eq!(status, Committed);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_rejection_paths() {
        assert_eq!(Proposed.advance(Rejected).unwrap(), Rejected);
        assert_eq!(Verified.advance(Rejected).unwrap(), Rejected);
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Committed, Rejected] {
            for next in [Proposed, Verified, Committed, Rejected] {
                assert_eq!(
                    terminal.advance(next),
                    Err(NetworkError::InvalidTransition { from: terminal, to: next })
                );
            }
        }
    }

    #[test]
    fn test_cannot_skip_verification() {
        assert!(Proposed.advance(Committed).is_err());
        assert!(Verified.advance(Proposed).is_err());
    }
}
