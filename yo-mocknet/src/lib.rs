//! Yo Mock Network - deterministic in-memory ledger harness
//!
//! A [`MockNetwork`] holds a handful of simulated participants. Transactions
//! are submitted into a queue and processed only when the caller drains the
//! network with [`MockNetwork::run_network`]; each proposal is checked for
//! double spends, verified by the contract and then committed atomically to
//! the recipients' vaults.

pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod status;
pub mod vault;

pub use config::NetworkConfig;
pub use error::{NetworkError, NetworkErrorCategory};
pub use network::{payload_equals, CommitResult, MockNetwork, ProposalId};
pub use node::MockNode;
pub use status::TransactionStatus;
pub use vault::Vault;

/// Result type for mock network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
