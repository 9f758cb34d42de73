//! Commands a transaction asserts it performs

use crate::PartyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of action a command declares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    /// Send a Yo to another party
    Send,
    /// A command belonging to some other contract
    Other(String),
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Send => f.write_str("Send"),
            CommandKind::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    kind: CommandKind,
    required_signers: BTreeSet<PartyId>,
}

impl Command {
    pub fn new(kind: CommandKind, required_signers: impl IntoIterator<Item = PartyId>) -> Self {
        Self {
            kind,
            required_signers: required_signers.into_iter().collect(),
        }
    }

    /// A `Send` command requiring the given signers
    pub fn send(required_signers: impl IntoIterator<Item = PartyId>) -> Self {
        Self::new(CommandKind::Send, required_signers)
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    pub fn required_signers(&self) -> &BTreeSet<PartyId> {
        &self.required_signers
    }

    pub fn is_send(&self) -> bool {
        self.kind == CommandKind::Send
    }

    /// Whether some required signer signs with the key of `party`
    pub fn requires_key_of(&self, party: &PartyId) -> bool {
        self.required_signers.iter().any(|s| s.owns_key_of(party))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::party::test_identities::{alice, bob};

    #[test]
    fn test_send_command() {
        let command = Command::send([alice(), alice()]);
        assert!(command.is_send());
        assert_eq!(command.required_signers().len(), 1);
        assert!(command.requires_key_of(&alice()));
        assert!(!command.requires_key_of(&bob()));
    }

    #[test]
    fn test_other_kind_display() {
        let command = Command::new(CommandKind::Other("Dummy".to_string()), [alice()]);
        assert!(!command.is_send());
        assert_eq!(command.kind().to_string(), "Dummy");
    }
}
