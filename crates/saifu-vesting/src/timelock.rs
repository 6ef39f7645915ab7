//! Standalone token timelock.
//!
//! Holds whatever balance its own address owns in one asset and pays it
//! to a fixed beneficiary once the release time is reached. Release is
//! one-shot: after the first success the timelock is terminal and every
//! further call is rejected, not silently ignored.

use serde::{Deserialize, Serialize};

use saifu_ledger::FungibleAsset;
use saifu_types::{AccountId, Amount, Result, SaifuError, Timestamp};

/// Single-beneficiary, single-asset, single-release-time custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTimelock {
    /// Address under which the asset credits this timelock's balance.
    holder: AccountId,
    /// The asset this timelock custodies.
    asset: AccountId,
    /// Who receives the balance on release.
    beneficiary: AccountId,
    /// Earliest instant of release.
    release_time: Timestamp,
    /// Set by the first successful release.
    released: bool,
}

impl TokenTimelock {
    /// Create a timelock. All fields are fixed for its lifetime.
    ///
    /// # Errors
    /// Returns `InvalidRecipient` if the holder or beneficiary is null.
    pub fn new(
        holder: AccountId,
        asset: AccountId,
        beneficiary: AccountId,
        release_time: Timestamp,
    ) -> Result<Self> {
        if holder.is_null() || beneficiary.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        Ok(Self {
            holder,
            asset,
            beneficiary,
            release_time,
            released: false,
        })
    }

    #[must_use]
    pub fn holder(&self) -> AccountId {
        self.holder
    }

    #[must_use]
    pub fn asset(&self) -> AccountId {
        self.asset
    }

    #[must_use]
    pub fn beneficiary(&self) -> AccountId {
        self.beneficiary
    }

    #[must_use]
    pub fn release_time(&self) -> Timestamp {
        self.release_time
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Pay the full held balance to the beneficiary.
    ///
    /// Returns the amount released.
    ///
    /// # Errors
    /// - `AssetMismatch` if `asset` is not the custodied asset
    /// - `AlreadyReleased` on any call after the first success
    /// - `NotYetReleasable` if `now` is before the release time
    /// - `InvalidAmount` if the holder owns nothing
    pub fn release<A: FungibleAsset>(&mut self, asset: &mut A, now: Timestamp) -> Result<Amount> {
        if asset.address() != self.asset {
            return Err(SaifuError::AssetMismatch {
                expected: self.asset,
                actual: asset.address(),
            });
        }
        if self.released {
            return Err(SaifuError::AlreadyReleased);
        }
        if !now.has_reached(self.release_time) {
            return Err(SaifuError::NotYetReleasable {
                release_time: self.release_time,
                now,
            });
        }

        let amount = asset.balance_of(&self.holder);
        if amount.is_zero() {
            return Err(SaifuError::InvalidAmount {
                reason: "no tokens to release".into(),
            });
        }

        asset.transfer(self.holder, self.beneficiary, amount)?;
        self.released = true;

        tracing::info!(
            holder = %self.holder,
            beneficiary = %self.beneficiary,
            amount = %amount,
            "Timelock released"
        );
        Ok(amount)
    }
}
