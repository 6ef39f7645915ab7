//! # saifu-vesting
//!
//! **Time-locked custody**: per-beneficiary holder ledgers and the
//! standalone single-beneficiary timelock.
//!
//! ## Architecture
//!
//! 1. **VestingManager**: arena of [`HolderRecord`](saifu_types::HolderRecord)s
//!    keyed by beneficiary. Locking moves value out of the main
//!    [`Ledger`](saifu_ledger::Ledger) into holder custody; unlocking moves
//!    it back to the beneficiary once the release time is reached.
//! 2. **TokenTimelock**: fixed `(asset, beneficiary, release_time)` custody
//!    that releases whatever its own address holds, exactly once.
//!
//! ## Holder Flow
//!
//! ```text
//! Ledger.debit(from) → HolderRecord{LOCKED} ──(now ≥ release)──▶
//!     Ledger.credit(beneficiary) → HolderRecord{RELEASED}
//! ```

pub mod manager;
pub mod timelock;

pub use manager::VestingManager;
pub use timelock::TokenTimelock;
