//! Burn address designation and the exact-amount burn gate.

use serde::{Deserialize, Serialize};

use saifu_types::{AccountId, Amount, Result, SaifuError};

/// Holds the optional burn address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnRegistry {
    burn_address: Option<AccountId>,
}

impl BurnRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { burn_address: None }
    }

    #[must_use]
    pub fn with_address(burn_address: Option<AccountId>) -> Self {
        Self { burn_address }
    }

    /// The designated burn address, if any.
    #[must_use]
    pub fn address(&self) -> Option<AccountId> {
        self.burn_address
    }

    /// The burn address, or `BurnAddressNotSet`.
    pub fn require_address(&self) -> Result<AccountId> {
        self.burn_address.ok_or(SaifuError::BurnAddressNotSet)
    }

    /// Designate (or replace) the burn address.
    ///
    /// # Errors
    /// Returns `InvalidRecipient` if `address` is null.
    pub fn set(&mut self, address: AccountId) -> Result<()> {
        if address.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        self.burn_address = Some(address);
        Ok(())
    }

    /// Accept a burn request only if it names the burn address balance
    /// exactly. Larger and smaller values are both rejected, as is zero.
    pub fn check_exact(current_balance: Amount, requested: Amount) -> Result<()> {
        if requested.is_zero() {
            return Err(SaifuError::InvalidAmount {
                reason: "burn amount must be greater than zero".into(),
            });
        }
        if requested != current_balance {
            return Err(SaifuError::InvalidAmount {
                reason: format!(
                    "burn amount {requested} does not match burn address balance {current_balance}"
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_by_default() {
        let reg = BurnRegistry::new();
        assert_eq!(reg.address(), None);
        assert_eq!(reg.require_address().unwrap_err(), SaifuError::BurnAddressNotSet);
    }

    #[test]
    fn set_is_repeatable() {
        let mut reg = BurnRegistry::new();
        let a = AccountId::random();
        let b = AccountId::random();
        reg.set(a).unwrap();
        reg.set(b).unwrap();
        assert_eq!(reg.address(), Some(b));
    }

    #[test]
    fn set_null_rejected() {
        let mut reg = BurnRegistry::with_address(Some(AccountId::from_low_u64(1)));
        assert_eq!(reg.set(AccountId::ZERO).unwrap_err(), SaifuError::InvalidRecipient);
        assert_eq!(reg.address(), Some(AccountId::from_low_u64(1)));
    }

    #[test]
    fn exact_amount_gate() {
        let balance = Amount::from(2_000u64);
        assert!(BurnRegistry::check_exact(balance, balance).is_ok());
        assert!(BurnRegistry::check_exact(balance, Amount::from(1_999u64)).is_err());
        assert!(BurnRegistry::check_exact(balance, Amount::from(2_001u64)).is_err());
        assert!(BurnRegistry::check_exact(Amount::zero(), Amount::zero()).is_err());
    }
}
