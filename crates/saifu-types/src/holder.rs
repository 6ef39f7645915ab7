//! # Holder ledgers: per-beneficiary locked custody
//!
//! A holder custodies tokens for one beneficiary until a release time.
//!
//! ## State Machine
//!
//! ```text
//!   (none) ──lock──▶ ┌────────┐  unlock (now ≥ release)  ┌──────────┐
//!                    │ LOCKED ├─────────────────────────▶│ RELEASED │
//!                    └────────┘                          └────┬─────┘
//!                        ▲          fresh lock (custody 0)    │
//!                        └────────────────────────────────────┘
//! ```
//!
//! While `Locked`, the holder cannot be re-locked. A `Released` holder has
//! zero custody and may be re-armed by a fresh lock.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, Timestamp};

/// The lifecycle state of a holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolderState {
    /// Custody is locked until the release time.
    Locked,
    /// Custody was paid out to the beneficiary. Custody is zero.
    Released,
}

impl HolderState {
    /// Can this holder transition to the given target state?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Locked, Self::Released) | (Self::Released, Self::Locked)
        )
    }
}

impl std::fmt::Display for HolderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locked => write!(f, "LOCKED"),
            Self::Released => write!(f, "RELEASED"),
        }
    }
}

/// Auxiliary ledger custodying locked tokens for a single beneficiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderRecord {
    /// Stable address of this holder, derived from the beneficiary.
    pub address: AccountId,
    /// Who receives the custody on unlock.
    pub beneficiary: AccountId,
    /// Tokens held in custody (outside the main balance table).
    pub custody: Amount,
    /// Earliest instant at which the custody may be released.
    pub release_time: Timestamp,
    /// Current lifecycle state.
    pub state: HolderState,
    /// When the current lock was placed.
    pub locked_at: Timestamp,
}

impl HolderRecord {
    /// Whether the holder still has locked custody.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state == HolderState::Locked
    }

    /// Whether the custody could be released at `now`.
    #[must_use]
    pub fn is_releasable(&self, now: Timestamp) -> bool {
        self.is_locked() && now.has_reached(self.release_time)
    }
}
