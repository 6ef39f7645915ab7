//! Vesting manager: creates, looks up and releases per-beneficiary holders.
//!
//! The VestingManager atomically debits the funding account and places the
//! amount in a holder's custody. When the release time is reached, unlocking
//! credits the full custody to the beneficiary and marks the holder RELEASED.

use std::collections::HashMap;

use saifu_ledger::Ledger;
use saifu_types::{
    constants, math, AccountId, Amount, HolderRecord, HolderState, Result, SaifuError, Timestamp,
};

/// Arena of holder ledgers, one per beneficiary, created lazily.
#[derive(Debug, Clone, Default)]
pub struct VestingManager {
    /// Holders indexed by beneficiary.
    holders: HashMap<AccountId, HolderRecord>,
}

impl VestingManager {
    /// Create a manager with no holders.
    #[must_use]
    pub fn new() -> Self {
        Self {
            holders: HashMap::new(),
        }
    }

    /// Rebuild a manager from persisted holder records.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if a record is inconsistent:
    /// duplicate beneficiary, foreign address, or custody left in a
    /// released holder.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = HolderRecord>,
    {
        let mut holders = HashMap::new();
        for record in records {
            let reason = if record.address != Self::holder_address(&record.beneficiary) {
                Some("holder address does not match beneficiary")
            } else if record.state == HolderState::Released && !record.custody.is_zero() {
                Some("released holder still has custody")
            } else if holders.contains_key(&record.beneficiary) {
                Some("duplicate holder for beneficiary")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(SaifuError::SupplyInvariantViolation {
                    reason: format!("{reason}: {}", record.beneficiary),
                });
            }
            holders.insert(record.beneficiary, record);
        }
        Ok(Self { holders })
    }

    /// Stable holder address for a beneficiary.
    #[must_use]
    pub fn holder_address(beneficiary: &AccountId) -> AccountId {
        AccountId::derived(constants::HOLDER_DOMAIN, beneficiary)
    }

    /// Atomically debit `from` and lock `amount` for `beneficiary`.
    ///
    /// 1. Validate the beneficiary, amount and holder state
    /// 2. Debit `from` in the ledger
    /// 3. Create (or re-arm a released) holder in LOCKED state
    ///
    /// If the debit fails, no holder is created or changed.
    ///
    /// # Errors
    /// - `InvalidRecipient` if `beneficiary` is null
    /// - `InvalidAmount` if `amount` is zero
    /// - `HolderAlreadyActive` if the beneficiary's holder is still LOCKED
    /// - `InsufficientBalance` if `from` can't fund the lock
    pub fn lock(
        &mut self,
        ledger: &mut Ledger,
        from: AccountId,
        beneficiary: AccountId,
        amount: Amount,
        release_time: Timestamp,
        now: Timestamp,
    ) -> Result<AccountId> {
        self.check_lockable(beneficiary, amount)?;

        // Step 1: move value out of the main ledger (atomic on its own)
        ledger.debit(from, amount)?;

        // Step 2: place it in custody
        let address = Self::holder_address(&beneficiary);
        let record = HolderRecord {
            address,
            beneficiary,
            custody: amount,
            release_time,
            state: HolderState::Locked,
            locked_at: now,
        };
        self.holders.insert(beneficiary, record);

        tracing::info!(
            beneficiary = %beneficiary,
            holder = %address,
            amount = %amount,
            release_time = %release_time,
            "Tokens locked"
        );
        Ok(address)
    }

    /// Validate a lock without performing it.
    ///
    /// # Errors
    /// Same argument and state errors as [`lock`](Self::lock), minus the
    /// funding check.
    pub fn check_lockable(&self, beneficiary: AccountId, amount: Amount) -> Result<()> {
        if beneficiary.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        if amount.is_zero() {
            return Err(SaifuError::InvalidAmount {
                reason: "locked amount must be greater than zero".into(),
            });
        }
        if self.get(&beneficiary).is_some_and(HolderRecord::is_locked) {
            return Err(SaifuError::HolderAlreadyActive(beneficiary));
        }
        Ok(())
    }

    /// Release a holder's full custody to its beneficiary.
    ///
    /// Returns the amount released.
    ///
    /// # Errors
    /// - `HolderNotFound` if no holder was ever created for `beneficiary`
    /// - `AlreadyReleased` if the holder is RELEASED
    /// - `NotYetReleasable` if `now` is before the release time
    /// - `ArithmeticFault` if the beneficiary's balance would overflow
    pub fn unlock(
        &mut self,
        ledger: &mut Ledger,
        beneficiary: AccountId,
        now: Timestamp,
    ) -> Result<Amount> {
        let record = self
            .holders
            .get_mut(&beneficiary)
            .ok_or(SaifuError::HolderNotFound(beneficiary))?;

        if !record.state.can_transition_to(HolderState::Released) {
            return Err(SaifuError::AlreadyReleased);
        }
        if !record.is_releasable(now) {
            return Err(SaifuError::NotYetReleasable {
                release_time: record.release_time,
                now,
            });
        }

        let amount = record.custody;
        // Credit first: if it faults the holder keeps its custody.
        ledger.credit(beneficiary, amount)?;
        record.custody = Amount::zero();
        record.state = HolderState::Released;

        tracing::info!(
            beneficiary = %beneficiary,
            holder = %record.address,
            amount = %amount,
            "Tokens unlocked"
        );
        Ok(amount)
    }

    /// Look up a beneficiary's holder.
    #[must_use]
    pub fn get(&self, beneficiary: &AccountId) -> Option<&HolderRecord> {
        self.holders.get(beneficiary)
    }

    /// All holders, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = &HolderRecord> {
        self.holders.values()
    }

    /// Sum of custody across all holders.
    ///
    /// # Errors
    /// Returns `ArithmeticFault` on overflow (only possible on corrupted state).
    pub fn total_locked(&self) -> Result<Amount> {
        math::checked_sum(self.holders.values().map(|h| h.custody))
    }

    /// Number of holders ever created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.holders.len()
    }

    /// Number of holders currently LOCKED.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.holders.values().filter(|h| h.is_locked()).count()
    }
}
