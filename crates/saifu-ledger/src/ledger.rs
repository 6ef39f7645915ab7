//! Balance and allowance tables.
//!
//! Tracks per-account balances and per-(owner, spender) allowances.
//! All mutations are atomic: either the full operation succeeds or
//! both tables are unchanged. Zero entries are removed, so an absent
//! account and a zero balance are the same state.

use std::collections::HashMap;

use saifu_types::{math, AccountId, Amount, Result, SaifuError};

/// The main ledger: balances and allowances.
///
/// The Ledger is the source of truth for all balance state outside
/// vesting holders. Higher layers call into it to move value in and out
/// of holder custody (`debit` / `credit`).
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Per-account balances.
    balances: HashMap<AccountId, Amount>,
    /// Per-(owner, spender) allowances.
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Create a ledger holding the genesis allocations.
    ///
    /// Repeated accounts accumulate.
    ///
    /// # Errors
    /// Returns `ArithmeticFault` if an account's total overflows.
    pub fn mint_genesis<I>(allocations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (AccountId, Amount)>,
    {
        let mut ledger = Self::new();
        for (account, amount) in allocations {
            ledger.credit(account, amount)?;
        }
        Ok(ledger)
    }

    /// Balance of an account. Unknown accounts hold zero.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Remaining amount `spender` may draw from `owner`.
    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Transfer `amount` from `from` to `to`.
    ///
    /// # Errors
    /// - `InvalidRecipient` if `to` is null
    /// - `InsufficientBalance` if `from` holds less than `amount`
    /// - `ArithmeticFault` if `to`'s balance would overflow
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        if to.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        self.move_balance(from, to, amount)?;
        tracing::debug!(from = %from, to = %to, amount = %amount, "Transfer");
        Ok(())
    }

    /// Overwrite the allowance of `spender` over `owner`'s balance.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        self.set_allowance(owner, spender, amount);
        tracing::debug!(owner = %owner, spender = %spender, amount = %amount, "Approval");
    }

    /// Raise an allowance by `delta`. Returns the new allowance.
    ///
    /// # Errors
    /// Returns `ArithmeticFault` if the allowance would overflow.
    pub fn increase_approval(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        delta: Amount,
    ) -> Result<Amount> {
        let updated = math::checked_add(self.allowance(&owner, &spender), delta)?;
        self.set_allowance(owner, spender, updated);
        tracing::debug!(
            owner = %owner,
            spender = %spender,
            allowance = %updated,
            "Approval increased"
        );
        Ok(updated)
    }

    /// Lower an allowance by `delta`, clamping at zero. Returns the new allowance.
    pub fn decrease_approval(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        delta: Amount,
    ) -> Amount {
        let updated = self.allowance(&owner, &spender).saturating_sub(delta);
        self.set_allowance(owner, spender, updated);
        tracing::debug!(
            owner = %owner,
            spender = %spender,
            allowance = %updated,
            "Approval decreased"
        );
        updated
    }

    /// Spend `spender`'s allowance over `from` to move `amount` to `to`.
    ///
    /// # Errors
    /// - `InvalidRecipient` if `to` is null
    /// - `InsufficientAllowance` if the allowance is below `amount`
    /// - `InsufficientBalance` if `from` holds less than `amount`
    /// - `ArithmeticFault` if `to`'s balance would overflow
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        if to.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(SaifuError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        let remaining = math::checked_sub(allowed, amount)?;

        // Balance move validates everything it needs before writing; the
        // allowance write comes after so a failed move leaves it untouched.
        self.move_balance(from, to, amount)?;
        self.set_allowance(from, spender, remaining);

        tracing::debug!(
            spender = %spender,
            from = %from,
            to = %to,
            amount = %amount,
            "Delegated transfer"
        );
        Ok(())
    }

    /// Remove `amount` from an account (value leaves the main ledger,
    /// e.g. into holder custody).
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the account holds less than `amount`.
    pub fn debit(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let available = self.balance_of(&account);
        if available < amount {
            return Err(SaifuError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let updated = math::checked_sub(available, amount)?;
        self.set_balance(account, updated);
        Ok(())
    }

    /// Add `amount` to an account (value enters the main ledger,
    /// e.g. out of holder custody).
    ///
    /// # Errors
    /// Returns `ArithmeticFault` if the balance would overflow.
    pub fn credit(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let updated = math::checked_add(self.balance_of(&account), amount)?;
        self.set_balance(account, updated);
        Ok(())
    }

    /// Zero an account's balance, returning what it held.
    pub fn burn_balance(&mut self, account: &AccountId) -> Amount {
        self.balances.remove(account).unwrap_or_default()
    }

    /// Sum of all balances.
    ///
    /// # Errors
    /// Returns `ArithmeticFault` if the sum overflows (only possible if the
    /// ledger was corrupted).
    pub fn circulating(&self) -> Result<Amount> {
        math::checked_sum(self.balances.values().copied())
    }

    /// All non-zero balances, in no particular order.
    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, &Amount)> {
        self.balances.iter()
    }

    /// All non-zero allowances as `((owner, spender), amount)`.
    pub fn allowances(&self) -> impl Iterator<Item = (&(AccountId, AccountId), &Amount)> {
        self.allowances.iter()
    }

    /// Accounts with a non-zero balance.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountId> {
        self.balances.keys()
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// Core balance move without recipient validation.
    ///
    /// Both new balances are computed before either is written.
    pub fn move_balance(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(SaifuError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            });
        }
        if from == to {
            return Ok(());
        }
        let new_from = math::checked_sub(from_balance, amount)?;
        let new_to = math::checked_add(self.balance_of(&to), amount)?;
        self.set_balance(from, new_from);
        self.set_balance(to, new_to);
        Ok(())
    }

    fn set_balance(&mut self, account: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    fn set_allowance(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}
