//! Party identities and the keys used for signer matching

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::fmt;

/// Public key of a party. Signatures are matched by key, not by name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    /// Wrap raw key bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        PublicKey(bytes)
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    fn derive(name: &str) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(b"yo-party-key-v1");
        hasher.update(name.as_bytes());
        PublicKey(hasher.finalize().into())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &hex::encode(self.0)[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A participant's identity: a legal name plus the key it signs with
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartyId {
    name: String,
    public_key: PublicKey,
}

impl PartyId {
    /// Create an identity whose key is derived from the name. The same name
    /// always yields the same key.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let public_key = PublicKey::derive(&name);
        Self { name, public_key }
    }

    /// Create an identity with an explicit key
    pub fn with_key(name: impl Into<String>, public_key: PublicKey) -> Self {
        Self {
            name: name.into(),
            public_key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether `other` signs with the same key as this party
    pub fn owns_key_of(&self, other: &PartyId) -> bool {
        self.public_key == other.public_key
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Well-known identities for tests and demos
pub mod test_identities {
    use super::PartyId;

    pub fn alice() -> PartyId {
        PartyId::new("Alice")
    }

    pub fn bob() -> PartyId {
        PartyId::new("Bob")
    }

    pub fn mini_corp() -> PartyId {
        PartyId::new("MiniCorp")
    }
}
