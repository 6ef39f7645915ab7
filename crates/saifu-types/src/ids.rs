//! Account identifiers used throughout the ledger.
//!
//! An account is a fixed-length 20-byte opaque handle. The all-zero value
//! is the null identifier and is never a valid destination.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Byte length of an [`AccountId`].
pub const ACCOUNT_ID_LEN: usize = 20;

/// Opaque identifier of a party able to hold balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// The null identifier.
    pub const ZERO: Self = Self([0u8; ACCOUNT_ID_LEN]);

    /// Whether this is the null identifier.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; ACCOUNT_ID_LEN]
    }

    /// Deterministic identifier derived from a domain tag and a parent account.
    ///
    /// Used to give sub-ledgers (vesting holders, the token itself) stable
    /// addresses: the same inputs always produce the same identifier.
    #[must_use]
    pub fn derived(domain: &[u8], parent: &AccountId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(parent.0);
        let hash = hasher.finalize();
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes.copy_from_slice(&hash[..ACCOUNT_ID_LEN]);
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Test identifiers. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl AccountId {
    /// A random non-null identifier.
    #[must_use]
    pub fn random() -> Self {
        loop {
            let id = Self(rand::random());
            if !id.is_null() {
                return id;
            }
        }
    }

    /// Identifier whose last eight bytes hold `n` big-endian.
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        bytes[ACCOUNT_ID_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }
}
