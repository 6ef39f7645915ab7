//! # saifu-token
//!
//! The **Saifu** token root: a fixed-supply ledger with owner-gated
//! reserves, exact-amount burns and per-beneficiary time-locked
//! distributions.
//!
//! [`SaifuToken`] owns every piece of state and exposes the external
//! operations. Each operation takes the caller identity explicitly (and the
//! current time where it matters), and is a single atomic state transition:
//! it either applies in full or returns an error with nothing changed.
//!
//! ## Initial Distribution
//!
//! ```text
//!   200M supply ─┬─ 130M → controller (sale)
//!                └─  70M → token float ─┬─ 20M funds reserve (one-shot)
//!                                       └─ ≤50M team (capped, optionally locked)
//! ```
//!
//! ## Operation Flow
//!
//! ```text
//! caller → Controller.require() → ReservationState / BurnRegistry checks
//!        → Ledger (checked arithmetic) ⇄ VestingManager (holder custody)
//! ```

pub mod burn;
pub mod reservation;
pub mod snapshot;
pub mod token;

pub use burn::BurnRegistry;
pub use reservation::ReservationState;
pub use snapshot::{AllowanceEntry, BalanceEntry, LedgerSnapshot};
pub use token::SaifuToken;
