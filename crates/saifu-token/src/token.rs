//! The token root and its external operations.
//!
//! Every operation follows the same shape:
//! 1. Gate privileged calls on the controller
//! 2. Validate arguments and state, computing new values with checked math
//! 3. Write
//!
//! A failure in steps 1–2 leaves the token untouched, and step 3 only
//! contains single atomic ledger/holder moves followed by infallible
//! bookkeeping.

use saifu_ledger::{Controller, FungibleAsset, Ledger, SupplyConservation};
use saifu_types::{
    constants, math, AccountId, Amount, HolderRecord, Result, SaifuError, Timestamp, TokenConfig,
    UnlockPolicy,
};
use saifu_vesting::VestingManager;

use crate::burn::BurnRegistry;
use crate::reservation::ReservationState;
use crate::snapshot::{AllowanceEntry, BalanceEntry, LedgerSnapshot};

/// Fixed-supply token with reserves, exact burns and vesting holders.
#[derive(Debug, Clone)]
pub struct SaifuToken {
    config: TokenConfig,
    /// The token's own address; its balance is the internal float.
    address: AccountId,
    ledger: Ledger,
    controller: Controller,
    supply: SupplyConservation,
    reservations: ReservationState,
    burn: BurnRegistry,
    vesting: VestingManager,
}

impl SaifuToken {
    /// Mint a new token.
    ///
    /// The controller receives the sale allocation; the rest of the supply
    /// is credited to the token's own address as its internal float.
    ///
    /// # Errors
    /// - `Configuration` if `config` is invalid
    /// - `InvalidRecipient` if `controller` is null
    pub fn new(config: TokenConfig, controller: AccountId) -> Result<Self> {
        config.validate()?;
        if controller.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }

        let initial = config.initial_supply_units()?;
        let sale = config.sale_allocation_units()?;
        let float = math::checked_sub(initial, sale)?;
        let address = AccountId::derived(constants::TOKEN_DOMAIN, &controller);

        let ledger = Ledger::mint_genesis([(controller, sale), (address, float)])?;

        let reservations =
            ReservationState::new(config.funds_reserve_units()?, config.team_cap_units()?);

        tracing::info!(
            name = %config.name,
            symbol = %config.symbol,
            controller = %controller,
            address = %address,
            supply = %initial,
            float = %float,
            "Token created"
        );

        Ok(Self {
            config,
            address,
            ledger,
            controller: Controller::new(controller),
            supply: SupplyConservation::new(initial),
            reservations,
            burn: BurnRegistry::new(),
            vesting: VestingManager::new(),
        })
    }

    /// Mint a token with the Saifu distribution.
    pub fn saifu(controller: AccountId) -> Result<Self> {
        Self::new(TokenConfig::saifu(), controller)
    }

    /// Rebuild a token from a snapshot and verify supply conservation.
    ///
    /// # Errors
    /// - `Configuration` if the snapshot's supply does not match `config`
    /// - `Serialization` if the snapshot is not canonical
    /// - `SupplyInvariantViolation` if the snapshot does not conserve supply
    pub fn restore(config: TokenConfig, snapshot: &LedgerSnapshot) -> Result<Self> {
        config.validate()?;
        snapshot.check_canonical()?;
        if snapshot.initial_supply != config.initial_supply_units()? {
            return Err(SaifuError::Configuration(format!(
                "snapshot supply {} does not match configured supply",
                snapshot.initial_supply
            )));
        }
        if snapshot.controller.is_null()
            || snapshot.controller == snapshot.address
            || snapshot.burn_address == Some(snapshot.address)
        {
            return Err(SaifuError::InvalidRecipient);
        }

        let mut ledger =
            Ledger::mint_genesis(snapshot.balances.iter().map(|e| (e.account, e.amount)))?;
        for entry in &snapshot.allowances {
            ledger.approve(entry.owner, entry.spender, entry.amount);
        }

        let reservations = ReservationState::restore(
            config.funds_reserve_units()?,
            snapshot.funds_reserved,
            config.team_cap_units()?,
            snapshot.already_reserved_for_team,
        )?;

        let token = Self {
            address: snapshot.address,
            ledger,
            controller: Controller::new(snapshot.controller),
            supply: SupplyConservation::with_burned(snapshot.initial_supply, snapshot.burned)?,
            reservations,
            burn: BurnRegistry::with_address(snapshot.burn_address),
            vesting: VestingManager::from_records(snapshot.holders.iter().cloned())?,
            config,
        };
        token.verify_supply()?;

        tracing::info!(
            address = %token.address,
            digest = %snapshot.digest_hex(),
            "Token restored from snapshot"
        );
        Ok(token)
    }

    // =================================================================
    // Metadata
    // =================================================================

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// The token's own address (holder of the internal float).
    #[must_use]
    pub fn address(&self) -> AccountId {
        self.address
    }

    /// Live supply: initial supply minus everything burned.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.supply.expected_supply()
    }

    /// Supply minted at creation.
    #[must_use]
    pub fn initial_total_supply(&self) -> Amount {
        self.supply.initial()
    }

    /// Cumulative burned amount.
    #[must_use]
    pub fn burned(&self) -> Amount {
        self.supply.burned()
    }

    #[must_use]
    pub fn controller(&self) -> AccountId {
        self.controller.current()
    }

    // =================================================================
    // Ledger core
    // =================================================================

    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.ledger.allowance(owner, spender)
    }

    /// Move `amount` from the caller to `to`.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is the token's own address
    /// - `InvalidRecipient`, `InsufficientBalance` from the ledger
    pub fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        self.require_external(&caller)?;
        self.ledger.transfer(caller, to, amount)
    }

    /// Set the caller's allowance for `spender` (overwrite).
    pub fn approve(&mut self, caller: AccountId, spender: AccountId, amount: Amount) -> Result<()> {
        self.require_external(&caller)?;
        self.ledger.approve(caller, spender, amount);
        Ok(())
    }

    /// Raise the caller's allowance for `spender` by `delta`.
    pub fn increase_approval(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: Amount,
    ) -> Result<Amount> {
        self.require_external(&caller)?;
        self.ledger.increase_approval(caller, spender, delta)
    }

    /// Lower the caller's allowance for `spender` by `delta`, clamping at zero.
    pub fn decrease_approval(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        delta: Amount,
    ) -> Result<Amount> {
        self.require_external(&caller)?;
        Ok(self.ledger.decrease_approval(caller, spender, delta))
    }

    /// Spend the caller's allowance over `from` to move `amount` to `to`.
    ///
    /// The float can never be `from`: it only moves through the
    /// controller-gated reservation calls.
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.require_external(&caller)?;
        self.require_external(&from)?;
        self.ledger.transfer_from(caller, from, to, amount)
    }

    // =================================================================
    // Access control
    // =================================================================

    /// Hand control to `new_controller`.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the controller
    /// - `InvalidRecipient` if `new_controller` is null or the token itself
    pub fn transfer_control(&mut self, caller: AccountId, new_controller: AccountId) -> Result<()> {
        self.controller.require(&caller)?;
        self.check_destination(new_controller)?;
        self.controller.transfer(&caller, new_controller)
    }

    /// No external caller may act as the token's own address.
    fn require_external(&self, caller: &AccountId) -> Result<()> {
        if *caller == self.address {
            tracing::warn!(caller = %caller, "Call as token address rejected");
            return Err(SaifuError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Destinations of privileged moves must be real, external accounts.
    fn check_destination(&self, destination: AccountId) -> Result<()> {
        if destination.is_null() || destination == self.address {
            return Err(SaifuError::InvalidRecipient);
        }
        Ok(())
    }

    // =================================================================
    // Reservation & burn
    // =================================================================

    /// Pay the funds reserve from the float to `destination`. At most once ever.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the controller
    /// - `InvalidRecipient` if `destination` is null or the token itself
    /// - `AlreadyReserved` on every call after the first success
    pub fn reserve_funds(&mut self, caller: AccountId, destination: AccountId) -> Result<()> {
        self.controller.require(&caller)?;
        self.check_destination(destination)?;
        self.reservations.check_funds()?;

        let amount = self.reservations.funds_reserve();
        self.ledger.move_balance(self.address, destination, amount)?;
        self.reservations.mark_funds_reserved();

        tracing::info!(destination = %destination, amount = %amount, "Funds reserved");
        Ok(())
    }

    /// Reserve part of the capped team allocation from the float.
    ///
    /// With `freeze_seconds == 0` the amount is paid directly; otherwise it
    /// is locked in `destination`'s holder until `now + freeze_seconds`.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the controller
    /// - `InvalidRecipient` if `destination` is null or the token itself
    /// - `CapExceeded` if the cumulative team total would pass the cap
    /// - `HolderAlreadyActive` / `InvalidAmount` from the vesting manager
    ///   when freezing
    pub fn reserve_for_team(
        &mut self,
        caller: AccountId,
        destination: AccountId,
        amount: Amount,
        freeze_seconds: u64,
        now: Timestamp,
    ) -> Result<()> {
        self.controller.require(&caller)?;
        self.check_destination(destination)?;
        let team_total = self.reservations.check_team(amount)?;

        if freeze_seconds == 0 {
            self.ledger.move_balance(self.address, destination, amount)?;
        } else {
            let release_time = now.checked_add_secs(freeze_seconds)?;
            self.vesting.lock(
                &mut self.ledger,
                self.address,
                destination,
                amount,
                release_time,
                now,
            )?;
        }
        self.reservations.commit_team(team_total);

        tracing::info!(
            destination = %destination,
            amount = %amount,
            freeze_seconds,
            team_total = %team_total,
            team_remaining = %self.reservations.team_remaining(),
            "Team allocation reserved"
        );
        Ok(())
    }

    /// Lock `amount` of the controller's own balance for `destination`
    /// until `now + freeze_seconds`. Uncapped; the freeze is mandatory.
    ///
    /// Returns the holder address.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the controller
    /// - `InvalidRecipient` if `destination` is null or the token itself
    /// - `InvalidAmount` if `amount` is zero
    /// - `InvalidFreezePeriod` if `freeze_seconds` is zero
    /// - `HolderAlreadyActive` if `destination` still has a locked holder
    /// - `InsufficientBalance` if the controller can't fund it
    pub fn send_with_freeze(
        &mut self,
        caller: AccountId,
        destination: AccountId,
        amount: Amount,
        freeze_seconds: u64,
        now: Timestamp,
    ) -> Result<AccountId> {
        self.controller.require(&caller)?;
        self.check_destination(destination)?;
        if amount.is_zero() {
            return Err(SaifuError::InvalidAmount {
                reason: "frozen amount must be greater than zero".into(),
            });
        }
        if freeze_seconds == 0 {
            return Err(SaifuError::InvalidFreezePeriod);
        }
        let release_time = now.checked_add_secs(freeze_seconds)?;

        let holder = self.vesting.lock(
            &mut self.ledger,
            caller,
            destination,
            amount,
            release_time,
            now,
        )?;

        tracing::info!(
            destination = %destination,
            holder = %holder,
            amount = %amount,
            release_time = %release_time,
            "Sent with freeze"
        );
        Ok(holder)
    }

    /// Designate (or replace) the burn address. The float itself is never
    /// a valid burn address.
    pub fn set_burn_address(&mut self, caller: AccountId, address: AccountId) -> Result<()> {
        self.controller.require(&caller)?;
        self.check_destination(address)?;
        self.burn.set(address)?;
        tracing::info!(burn_address = %address, "Burn address set");
        Ok(())
    }

    /// The designated burn address, if any.
    #[must_use]
    pub fn burn_address(&self) -> Option<AccountId> {
        self.burn.address()
    }

    /// Alias of [`burn_address`](Self::burn_address).
    #[must_use]
    pub fn get_burn_address(&self) -> Option<AccountId> {
        self.burn_address()
    }

    /// Destroy the burn address balance. `amount` must equal that balance
    /// exactly, so a balance change between read and call is rejected.
    ///
    /// Total supply decreases by the burned amount.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the controller
    /// - `BurnAddressNotSet` if no burn address is designated
    /// - `InvalidAmount` if `amount` is zero or differs from the balance
    pub fn burn_from_address(&mut self, caller: AccountId, amount: Amount) -> Result<()> {
        self.controller.require(&caller)?;
        let burn_address = self.burn.require_address()?;
        BurnRegistry::check_exact(self.ledger.balance_of(&burn_address), amount)?;

        self.supply.record_burn(amount)?;
        self.ledger.burn_balance(&burn_address);

        tracing::info!(
            burn_address = %burn_address,
            amount = %amount,
            total_supply = %self.total_supply(),
            "Tokens burned"
        );
        Ok(())
    }

    #[must_use]
    pub fn already_reserved_for_team(&self) -> Amount {
        self.reservations.already_reserved_for_team()
    }

    #[must_use]
    pub fn is_funds_reserved(&self) -> bool {
        self.reservations.is_funds_reserved()
    }

    #[must_use]
    pub fn reservations(&self) -> &ReservationState {
        &self.reservations
    }

    // =================================================================
    // Vesting
    // =================================================================

    /// The holder ledger for `beneficiary`, if one was ever created.
    #[must_use]
    pub fn get_locked_contract(&self, beneficiary: &AccountId) -> Option<&HolderRecord> {
        self.vesting.get(beneficiary)
    }

    /// Release `beneficiary`'s holder custody back into their balance.
    ///
    /// Who may call depends on the configured [`UnlockPolicy`].
    ///
    /// Returns the amount released.
    ///
    /// # Errors
    /// - `Unauthorized` under `ControllerOnly` for any other caller
    /// - `HolderNotFound`, `AlreadyReleased`, `NotYetReleasable` from the
    ///   vesting manager
    pub fn unlock_tokens(
        &mut self,
        caller: AccountId,
        beneficiary: AccountId,
        now: Timestamp,
    ) -> Result<Amount> {
        if self.config.unlock_policy == UnlockPolicy::ControllerOnly {
            self.controller.require(&caller)?;
        }
        self.vesting.unlock(&mut self.ledger, beneficiary, now)
    }

    /// Sum of custody across all holders.
    pub fn total_locked(&self) -> Result<Amount> {
        self.vesting.total_locked()
    }

    /// All holders, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = &HolderRecord> {
        self.vesting.holders()
    }

    // =================================================================
    // Invariants & state export
    // =================================================================

    /// Verify `Σ balances + Σ custody == total_supply`.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if value was created or lost.
    pub fn verify_supply(&self) -> Result<()> {
        let actual = math::checked_add(self.ledger.circulating()?, self.vesting.total_locked()?)?;
        self.supply.verify(actual)
    }

    /// Canonical snapshot of the full state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut snapshot = LedgerSnapshot {
            address: self.address,
            controller: self.controller.current(),
            burn_address: self.burn.address(),
            funds_reserved: self.reservations.is_funds_reserved(),
            already_reserved_for_team: self.reservations.already_reserved_for_team(),
            initial_supply: self.supply.initial(),
            burned: self.supply.burned(),
            balances: self
                .ledger
                .balances()
                .map(|(account, amount)| BalanceEntry {
                    account: *account,
                    amount: *amount,
                })
                .collect(),
            allowances: self
                .ledger
                .allowances()
                .map(|((owner, spender), amount)| AllowanceEntry {
                    owner: *owner,
                    spender: *spender,
                    amount: *amount,
                })
                .collect(),
            holders: self.vesting.holders().cloned().collect(),
        };
        snapshot.canonicalize();
        snapshot
    }

    /// SHA-256 of the canonical snapshot.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        self.snapshot().digest()
    }

    #[must_use]
    pub fn state_digest_hex(&self) -> String {
        self.snapshot().digest_hex()
    }
}

impl FungibleAsset for SaifuToken {
    fn address(&self) -> AccountId {
        self.address
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.ledger.balance_of(account)
    }

    fn transfer(&mut self, caller: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        SaifuToken::transfer(self, caller, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saifu_types::HolderState;

    fn tokens(n: u64) -> Amount {
        math::tokens(n).unwrap()
    }

    fn setup() -> (SaifuToken, AccountId) {
        let owner = AccountId::random();
        (SaifuToken::saifu(owner).unwrap(), owner)
    }

    #[test]
    fn creation_distributes_supply() {
        let (token, owner) = setup();
        assert_eq!(token.name(), "Saifu");
        assert_eq!(token.symbol(), "SFU");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), tokens(200_000_000));
        assert_eq!(token.initial_total_supply(), tokens(200_000_000));
        assert_eq!(token.balance_of(&owner), tokens(130_000_000));
        assert_eq!(token.balance_of(&token.address()), tokens(70_000_000));
        token.verify_supply().unwrap();
    }

    #[test]
    fn null_controller_rejected() {
        let err = SaifuToken::saifu(AccountId::ZERO).unwrap_err();
        assert_eq!(err, SaifuError::InvalidRecipient);
    }

    #[test]
    fn reserve_funds_pays_once() {
        let (mut token, owner) = setup();
        let fund = AccountId::random();
        token.reserve_funds(owner, fund).unwrap();
        assert_eq!(token.balance_of(&fund), tokens(20_000_000));
        assert_eq!(token.balance_of(&token.address()), tokens(50_000_000));

        let err = token.reserve_funds(owner, AccountId::random()).unwrap_err();
        assert_eq!(err, SaifuError::AlreadyReserved);
        assert_eq!(token.balance_of(&fund), tokens(20_000_000));
        token.verify_supply().unwrap();
    }

    #[test]
    fn reserve_for_team_direct() {
        let (mut token, owner) = setup();
        let team = AccountId::random();
        token
            .reserve_for_team(owner, team, tokens(10_000_000), 0, Timestamp(0))
            .unwrap();
        assert_eq!(token.balance_of(&team), tokens(10_000_000));
        assert_eq!(token.already_reserved_for_team(), tokens(10_000_000));
        assert!(token.get_locked_contract(&team).is_none());
    }

    #[test]
    fn reserve_for_team_frozen_goes_to_holder() {
        let (mut token, owner) = setup();
        let team = AccountId::random();
        token
            .reserve_for_team(
                owner,
                team,
                tokens(10_000_000),
                constants::HALF_YEAR,
                Timestamp(1_000),
            )
            .unwrap();
        assert_eq!(token.balance_of(&team), Amount::zero());
        let holder = token.get_locked_contract(&team).unwrap();
        assert_eq!(holder.custody, tokens(10_000_000));
        assert_eq!(holder.release_time, Timestamp(1_000 + constants::HALF_YEAR));
        assert_eq!(holder.state, HolderState::Locked);
        token.verify_supply().unwrap();

        let release = Timestamp(1_000 + constants::HALF_YEAR);
        assert_eq!(token.unlock_tokens(team, team, release).unwrap(), tokens(10_000_000));
        assert_eq!(token.balance_of(&team), tokens(10_000_000));
        let holder = token.get_locked_contract(&team).unwrap();
        assert_eq!(holder.custody, Amount::zero());
        assert_eq!(holder.state, HolderState::Released);
        token.verify_supply().unwrap();
    }

    #[test]
    fn failed_frozen_team_reservation_keeps_counter() {
        let (mut token, owner) = setup();
        let team = AccountId::random();
        token
            .reserve_for_team(owner, team, tokens(1_000), 100, Timestamp(0))
            .unwrap();

        let err = token
            .reserve_for_team(owner, team, tokens(2_000), 100, Timestamp(0))
            .unwrap_err();
        assert_eq!(err, SaifuError::HolderAlreadyActive(team));
        assert_eq!(token.already_reserved_for_team(), tokens(1_000));
    }

    #[test]
    fn reserve_for_team_freeze_overflow_faults() {
        let (mut token, owner) = setup();
        let before = token.state_digest();
        let err = token
            .reserve_for_team(owner, AccountId::random(), tokens(1), u64::MAX, Timestamp(1))
            .unwrap_err();
        assert!(matches!(err, SaifuError::ArithmeticFault { .. }));
        assert_eq!(token.state_digest(), before);
    }

    #[test]
    fn send_with_freeze_draws_from_controller() {
        let (mut token, owner) = setup();
        let investor = AccountId::random();
        let holder = token
            .send_with_freeze(owner, investor, tokens(5), 60, Timestamp(10))
            .unwrap();
        assert_eq!(holder, VestingManager::holder_address(&investor));
        assert_eq!(token.balance_of(&owner), tokens(130_000_000 - 5));
        assert_eq!(token.balance_of(&token.address()), tokens(70_000_000));
        assert_eq!(token.total_locked().unwrap(), tokens(5));
    }

    #[test]
    fn send_with_freeze_argument_checks() {
        let (mut token, owner) = setup();
        let investor = AccountId::random();
        assert_eq!(
            token
                .send_with_freeze(owner, AccountId::ZERO, tokens(1), 60, Timestamp(0))
                .unwrap_err(),
            SaifuError::InvalidRecipient
        );
        assert!(matches!(
            token.send_with_freeze(owner, investor, Amount::zero(), 60, Timestamp(0)),
            Err(SaifuError::InvalidAmount { .. })
        ));
        assert_eq!(
            token
                .send_with_freeze(owner, investor, tokens(1), 0, Timestamp(0))
                .unwrap_err(),
            SaifuError::InvalidFreezePeriod
        );
        assert!(matches!(
            token.send_with_freeze(owner, investor, tokens(130_000_001), 60, Timestamp(0)),
            Err(SaifuError::InsufficientBalance { .. })
        ));
        assert!(token.get_locked_contract(&investor).is_none());
    }

    #[test]
    fn token_address_cannot_act_as_caller() {
        let (mut token, _) = setup();
        let float = token.address();
        let attacker = AccountId::random();
        let before = token.state_digest();

        let unauthorized = SaifuError::Unauthorized { caller: float };
        assert_eq!(token.transfer(float, attacker, tokens(1)).unwrap_err(), unauthorized);
        assert_eq!(token.approve(float, attacker, tokens(1)).unwrap_err(), unauthorized);
        assert_eq!(
            token.increase_approval(float, attacker, tokens(1)).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            token.decrease_approval(float, attacker, tokens(1)).unwrap_err(),
            unauthorized
        );
        assert_eq!(
            token.transfer_from(attacker, float, attacker, tokens(1)).unwrap_err(),
            unauthorized
        );
        assert_eq!(token.state_digest(), before);
    }

    #[test]
    fn token_address_is_not_a_destination() {
        let (mut token, owner) = setup();
        let float = token.address();
        let before = token.state_digest();

        assert_eq!(token.reserve_funds(owner, float).unwrap_err(), SaifuError::InvalidRecipient);
        assert_eq!(
            token
                .reserve_for_team(owner, float, tokens(50_000_000), 0, Timestamp(0))
                .unwrap_err(),
            SaifuError::InvalidRecipient
        );
        assert_eq!(
            token
                .send_with_freeze(owner, float, tokens(1), 10, Timestamp(0))
                .unwrap_err(),
            SaifuError::InvalidRecipient
        );
        assert_eq!(token.set_burn_address(owner, float).unwrap_err(), SaifuError::InvalidRecipient);
        assert_eq!(token.transfer_control(owner, float).unwrap_err(), SaifuError::InvalidRecipient);
        assert_eq!(token.state_digest(), before);
        assert!(!token.is_funds_reserved());
        assert_eq!(token.already_reserved_for_team(), Amount::zero());
    }

    #[test]
    fn burn_requires_exact_balance() {
        let (mut token, owner) = setup();
        let burn = AccountId::random();
        token.set_burn_address(owner, burn).unwrap();
        token.transfer(owner, burn, tokens(2_000_000)).unwrap();

        assert!(token.burn_from_address(owner, tokens(1_999_999)).is_err());
        assert!(token.burn_from_address(owner, tokens(2_000_001)).is_err());
        assert_eq!(token.balance_of(&burn), tokens(2_000_000));

        token.burn_from_address(owner, tokens(2_000_000)).unwrap();
        assert_eq!(token.balance_of(&burn), Amount::zero());
        assert_eq!(token.burned(), tokens(2_000_000));
        assert_eq!(token.total_supply(), tokens(198_000_000));
        assert_eq!(token.initial_total_supply(), tokens(200_000_000));
        token.verify_supply().unwrap();
    }

    #[test]
    fn burn_without_address_rejected() {
        let (mut token, owner) = setup();
        let err = token.burn_from_address(owner, tokens(1)).unwrap_err();
        assert_eq!(err, SaifuError::BurnAddressNotSet);
    }

    #[test]
    fn unlock_policy_controller_only() {
        let owner = AccountId::random();
        let config = TokenConfig::saifu().with_unlock_policy(UnlockPolicy::ControllerOnly);
        let mut token = SaifuToken::new(config, owner).unwrap();
        let investor = AccountId::random();
        token
            .send_with_freeze(owner, investor, tokens(3), 10, Timestamp(0))
            .unwrap();

        let err = token
            .unlock_tokens(investor, investor, Timestamp(10))
            .unwrap_err();
        assert!(matches!(err, SaifuError::Unauthorized { .. }));
        assert_eq!(token.unlock_tokens(owner, investor, Timestamp(10)).unwrap(), tokens(3));
        assert_eq!(token.balance_of(&investor), tokens(3));
    }

    #[test]
    fn unlock_policy_anyone() {
        let (mut token, owner) = setup();
        let investor = AccountId::random();
        token
            .send_with_freeze(owner, investor, tokens(3), 10, Timestamp(0))
            .unwrap();
        let stranger = AccountId::random();
        assert_eq!(token.unlock_tokens(stranger, investor, Timestamp(10)).unwrap(), tokens(3));
        assert_eq!(token.balance_of(&investor), tokens(3));
        assert_eq!(token.balance_of(&stranger), Amount::zero());
    }

    #[test]
    fn snapshot_restore_roundtrip() {
        let (mut token, owner) = setup();
        let spender = AccountId::random();
        token.approve(owner, spender, tokens(7)).unwrap();
        token
            .send_with_freeze(owner, AccountId::random(), tokens(9), 10, Timestamp(0))
            .unwrap();
        token.reserve_funds(owner, AccountId::random()).unwrap();

        let snapshot = token.snapshot();
        let restored = SaifuToken::restore(TokenConfig::saifu(), &snapshot).unwrap();
        assert_eq!(restored.state_digest(), token.state_digest());
        assert_eq!(restored.allowance(&owner, &spender), tokens(7));
        assert!(restored.is_funds_reserved());
    }

    #[test]
    fn restore_rejects_unbalanced_snapshot() {
        let (token, _) = setup();
        let mut snapshot = token.snapshot();
        snapshot.balances[0].amount = snapshot.balances[0].amount + Amount::one();
        let err = SaifuToken::restore(TokenConfig::saifu(), &snapshot).unwrap_err();
        assert!(matches!(err, SaifuError::SupplyInvariantViolation { .. }));
    }
}
