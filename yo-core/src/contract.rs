//! Contract verification
//!
//! A [`Contract`] is a pure function from a transaction to accept or reject.
//! The ledger runs the contract before committing anything; the contract
//! itself never touches ledger state.

use crate::{Command, ContractError, Result, Transaction};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_INPUTS_MESSAGE: &str = "There can be no inputs when sending to other parties.";
pub const MISSING_COMMAND_MESSAGE: &str = "A Send command is required.";
pub const SIGNER_MESSAGE: &str = "The message must be signed by the sender.";
pub const SELF_SEND_MESSAGE: &str = "No sending messages to yourself!";

/// Contract rules, in the order they are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    NoInputs,
    SingleCommand,
    Signer,
    SelfSend,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::NoInputs => "no-inputs",
            Rule::SingleCommand => "single-command",
            Rule::Signer => "signer",
            Rule::SelfSend => "self-send",
        };
        f.write_str(name)
    }
}

/// Business rules a transaction must satisfy before it is committed
pub trait Contract {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Accept or reject a transaction. Must be deterministic and free of side
    /// effects.
    fn verify(&self, tx: &Transaction) -> Result<()>;
}

/// Rules for sending a Yo
#[derive(Debug, Clone, Copy, Default)]
pub struct YoContract;

impl Contract for YoContract {
    fn name(&self) -> &str {
        "yo"
    }

    fn verify(&self, tx: &Transaction) -> Result<()> {
        if tx.commands().iter().any(Command::is_send) && !tx.inputs().is_empty() {
            return Err(ContractError::violation(Rule::NoInputs, NO_INPUTS_MESSAGE));
        }

        let command = single_send_command(tx)?;

        let signed = command
            .required_signers()
            .iter()
            .all(|signer| tx.is_signed_by(signer));
        let senders_required = tx
            .outputs()
            .iter()
            .all(|yo| command.requires_key_of(yo.sender()));
        if !signed || !senders_required {
            return Err(ContractError::violation(Rule::Signer, SIGNER_MESSAGE));
        }

        if tx.outputs().iter().any(|yo| yo.sender().owns_key_of(yo.recipient())) {
            return Err(ContractError::violation(Rule::SelfSend, SELF_SEND_MESSAGE));
        }

        Ok(())
    }
}

fn single_send_command(tx: &Transaction) -> Result<&Command> {
    match tx.commands() {
        [] => Err(ContractError::violation(
            Rule::SingleCommand,
            MISSING_COMMAND_MESSAGE,
        )),
        [command] if command.is_send() => Ok(command),
        [command] => Err(ContractError::violation(
            Rule::SingleCommand,
            format!("Expected a Send command, found {}.", command.kind()),
        )),
        commands => Err(ContractError::violation(
            Rule::SingleCommand,
            format!("Exactly one command is allowed, found {}.", commands.len()),
        )),
    }
}

/// Verify a transaction against the Yo contract
pub fn verify(tx: &Transaction) -> Result<()> {
    YoContract.verify(tx)
}
