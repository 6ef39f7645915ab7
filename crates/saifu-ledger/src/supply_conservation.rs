//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced after every state change:
//! ```text
//! Σ(balances) + Σ(holder custody) == initial_supply - Σ(burned)
//! ```
//!
//! Transfers, reservations, locks and unlocks only move value around.
//! Burns are the single operation that removes value, and they are
//! recorded here so the expected supply shrinks with them.

use serde::{Deserialize, Serialize};

use saifu_types::{math, Amount, Result, SaifuError};

/// Tracks the initial supply and cumulative burns, and validates that the
/// value held across the ledger and all holders matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyConservation {
    /// Supply minted at creation. Never changes.
    initial: Amount,
    /// Total destroyed by burns since creation.
    burned: Amount,
}

impl SupplyConservation {
    /// Create a tracker for a freshly minted supply.
    #[must_use]
    pub fn new(initial: Amount) -> Self {
        Self {
            initial,
            burned: Amount::zero(),
        }
    }

    /// Rebuild a tracker with a known burn history.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if more was burned than minted.
    pub fn with_burned(initial: Amount, burned: Amount) -> Result<Self> {
        if burned > initial {
            return Err(SaifuError::SupplyInvariantViolation {
                reason: format!("burned {burned} exceeds initial supply {initial}"),
            });
        }
        Ok(Self { initial, burned })
    }

    /// Record a burn.
    ///
    /// # Errors
    /// Returns `ArithmeticFault` if the cumulative burn would exceed the
    /// initial supply.
    pub fn record_burn(&mut self, amount: Amount) -> Result<()> {
        let burned = math::checked_add(self.burned, amount)?;
        math::checked_sub(self.initial, burned)?;
        self.burned = burned;
        Ok(())
    }

    /// Supply minted at creation.
    #[must_use]
    pub fn initial(&self) -> Amount {
        self.initial
    }

    /// Total burned so far.
    #[must_use]
    pub fn burned(&self) -> Amount {
        self.burned
    }

    /// Expected live supply: initial - burned.
    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        // `record_burn` and `with_burned` keep burned <= initial.
        self.initial.saturating_sub(self.burned)
    }

    /// Verify that the actual supply (ledger balances plus holder custody)
    /// matches the expected supply.
    ///
    /// # Errors
    /// Returns [`SaifuError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            tracing::warn!(
                actual = %actual_supply,
                expected = %expected,
                burned = %self.burned,
                "Supply invariant violated"
            );
            return Err(SaifuError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (initial={}, burned={})",
                    self.initial, self.burned,
                ),
            });
        }
        Ok(())
    }
}
