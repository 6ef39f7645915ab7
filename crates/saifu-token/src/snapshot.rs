//! Persisted state layout and deterministic state digest.
//!
//! A [`LedgerSnapshot`] lists every balance, allowance and holder record
//! sorted by account, so two tokens in the same state produce the same
//! snapshot and the same digest regardless of operation order.
//!
//! Digest:
//! `SHA-256(domain_sep || address || controller || burn address ||
//! reservation state || supply || balances || allowances || holders)`

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use saifu_types::{constants, AccountId, Amount, HolderRecord, HolderState, Result, SaifuError};

/// One non-zero balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub account: AccountId,
    pub amount: Amount,
}

/// One non-zero allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    pub owner: AccountId,
    pub spender: AccountId,
    pub amount: Amount,
}

/// Complete token state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The token's own address (holds the float).
    pub address: AccountId,
    pub controller: AccountId,
    pub burn_address: Option<AccountId>,
    pub funds_reserved: bool,
    pub already_reserved_for_team: Amount,
    pub initial_supply: Amount,
    pub burned: Amount,
    /// Sorted by account.
    pub balances: Vec<BalanceEntry>,
    /// Sorted by (owner, spender).
    pub allowances: Vec<AllowanceEntry>,
    /// Sorted by beneficiary.
    pub holders: Vec<HolderRecord>,
}

impl LedgerSnapshot {
    /// Put every list in canonical order.
    pub fn canonicalize(&mut self) {
        self.balances.sort_by_key(|e| e.account);
        self.allowances.sort_by_key(|e| (e.owner, e.spender));
        self.holders.sort_by_key(|h| h.beneficiary);
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        snapshot.canonicalize();
        Ok(snapshot)
    }

    /// SHA-256 over the canonical encoding.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::DIGEST_DOMAIN);
        hasher.update(self.address.0);
        hasher.update(self.controller.0);
        match self.burn_address {
            Some(addr) => {
                hasher.update([1u8]);
                hasher.update(addr.0);
            }
            None => hasher.update([0u8]),
        }
        hasher.update([u8::from(self.funds_reserved)]);
        hasher.update(amount_bytes(self.already_reserved_for_team));
        hasher.update(amount_bytes(self.initial_supply));
        hasher.update(amount_bytes(self.burned));

        hasher.update((self.balances.len() as u64).to_le_bytes());
        for entry in &self.balances {
            hasher.update(entry.account.0);
            hasher.update(amount_bytes(entry.amount));
        }

        hasher.update((self.allowances.len() as u64).to_le_bytes());
        for entry in &self.allowances {
            hasher.update(entry.owner.0);
            hasher.update(entry.spender.0);
            hasher.update(amount_bytes(entry.amount));
        }

        hasher.update((self.holders.len() as u64).to_le_bytes());
        for holder in &self.holders {
            hasher.update(holder.address.0);
            hasher.update(holder.beneficiary.0);
            hasher.update(amount_bytes(holder.custody));
            hasher.update(holder.release_time.0.to_le_bytes());
            hasher.update([match holder.state {
                HolderState::Locked => 0u8,
                HolderState::Released => 1u8,
            }]);
            hasher.update(holder.locked_at.0.to_le_bytes());
        }

        hasher.finalize().into()
    }

    /// Hex form of [`digest`](Self::digest), for logs and comparisons.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    /// Reject snapshots whose lists are not in canonical order or repeat a key.
    pub fn check_canonical(&self) -> Result<()> {
        let sorted_unique = self.balances.windows(2).all(|w| w[0].account < w[1].account)
            && self
                .allowances
                .windows(2)
                .all(|w| (w[0].owner, w[0].spender) < (w[1].owner, w[1].spender))
            && self
                .holders
                .windows(2)
                .all(|w| w[0].beneficiary < w[1].beneficiary);
        if sorted_unique {
            Ok(())
        } else {
            Err(SaifuError::Serialization(
                "snapshot lists are unsorted or contain duplicates".into(),
            ))
        }
    }
}

fn amount_bytes(amount: Amount) -> [u8; 32] {
    let mut buf = [0u8; 32];
    amount.to_big_endian(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_snapshot() -> LedgerSnapshot {
        let mut snapshot = LedgerSnapshot {
            address: AccountId::from_low_u64(1),
            controller: AccountId::from_low_u64(2),
            burn_address: None,
            funds_reserved: false,
            already_reserved_for_team: Amount::zero(),
            initial_supply: Amount::from(1_000u64),
            burned: Amount::zero(),
            balances: vec![
                BalanceEntry {
                    account: AccountId::from_low_u64(2),
                    amount: Amount::from(600u64),
                },
                BalanceEntry {
                    account: AccountId::from_low_u64(1),
                    amount: Amount::from(400u64),
                },
            ],
            allowances: Vec::new(),
            holders: Vec::new(),
        };
        snapshot.canonicalize();
        snapshot
    }

    #[test]
    fn canonicalize_sorts() {
        let snapshot = make_snapshot();
        assert_eq!(snapshot.balances[0].account, AccountId::from_low_u64(1));
        assert!(snapshot.check_canonical().is_ok());
    }

    #[test]
    fn digest_is_deterministic() {
        let a = make_snapshot();
        let b = make_snapshot();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest_hex().len(), 64);
    }

    #[test]
    fn digest_changes_with_state() {
        let a = make_snapshot();
        let mut b = make_snapshot();
        b.funds_reserved = true;
        assert_ne!(a.digest(), b.digest());

        let mut c = make_snapshot();
        c.burn_address = Some(AccountId::from_low_u64(9));
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn json_roundtrip_preserves_digest() {
        let snapshot = make_snapshot();
        let json = snapshot.to_json().unwrap();
        let back = LedgerSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, back);
        assert_eq!(snapshot.digest(), back.digest());
    }

    #[test]
    fn duplicates_are_not_canonical() {
        let mut snapshot = make_snapshot();
        let dup = snapshot.balances[0].clone();
        snapshot.balances.push(dup);
        snapshot.canonicalize();
        assert!(snapshot.check_canonical().is_err());
    }
}
