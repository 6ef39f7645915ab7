//! # saifu-types
//!
//! Shared types, errors, and configuration for the **Saifu** token ledger.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`]
//! - **Time**: [`Timestamp`]
//! - **Amounts**: [`Amount`] and the checked arithmetic in [`math`]
//! - **Holder model**: [`HolderRecord`], [`HolderState`]
//! - **Configuration**: [`TokenConfig`], [`UnlockPolicy`]
//! - **Errors**: [`SaifuError`] with `SFU_ERR_` prefix codes
//! - **Constants**: token parameters and the initial distribution

pub mod config;
pub mod constants;
pub mod error;
pub mod holder;
pub mod ids;
pub mod math;
pub mod time;

// Re-export all primary types at crate root for ergonomic imports:
//   use saifu_types::{AccountId, Amount, SaifuError, ...};

pub use config::*;
pub use error::*;
pub use holder::*;
pub use ids::*;
pub use math::Amount;
pub use time::*;

// Constants are accessed via `saifu_types::constants::FOO` and the
// arithmetic helpers via `saifu_types::math::checked_add` etc.
