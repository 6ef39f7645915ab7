//! Trait seam for holders that custody a fungible asset under their own
//! address.

use saifu_types::{AccountId, Amount, Result};

/// A single fungible asset addressable by account.
///
/// Implemented by the token; consumed by custody primitives such as the
/// standalone timelock, which only ever need to read their own balance and
/// move it out.
pub trait FungibleAsset {
    /// Address identifying this asset.
    fn address(&self) -> AccountId;

    /// Balance of `account` in this asset.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Move `amount` from `caller` to `to`, with the asset's usual checks.
    fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()>;
}
