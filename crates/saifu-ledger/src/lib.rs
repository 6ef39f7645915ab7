//! # saifu-ledger
//!
//! **Ledger Core**: balance and allowance accounting, controller gating,
//! and the supply conservation check.
//!
//! ## Architecture
//!
//! 1. **Ledger**: `account → balance` and `(owner, spender) → allowance`
//! 2. **Controller**: single privileged identity gating owner-only calls
//! 3. **SupplyConservation**: tracks initial supply and burns, verifies
//!    that every base unit is accounted for
//! 4. **FungibleAsset**: trait seam used by holders that custody tokens
//!    under their own address
//!
//! Every mutation either applies in full or leaves the ledger unchanged:
//! new values are computed through checked arithmetic before any write.

pub mod access;
pub mod asset;
pub mod ledger;
pub mod supply_conservation;

pub use access::Controller;
pub use asset::FungibleAsset;
pub use ledger::Ledger;
pub use supply_conservation::SupplyConservation;
