//! Configuration types for a Saifu token instance.

use serde::{Deserialize, Serialize};

use crate::{constants, math, Amount, Result, SaifuError};

/// Who may call `unlock_tokens` for a beneficiary's holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockPolicy {
    /// Any caller; the custody still only ever goes to the beneficiary.
    #[default]
    Anyone,
    /// Only the controller.
    ControllerOnly,
}

/// Parameters of a token instance.
///
/// Allocation sizes are whole tokens; the ledger works in base units
/// (`whole * 10^decimals`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token name (e.g., "Saifu").
    pub name: String,
    /// Token symbol (e.g., "SFU").
    pub symbol: String,
    /// Decimal places of the base unit.
    pub decimals: u8,
    /// Total supply minted at creation, in whole tokens.
    pub initial_supply: u64,
    /// Credited to the controller at creation, in whole tokens.
    /// The rest of the supply is the token's internal float.
    pub sale_allocation: u64,
    /// One-shot funds reserve paid from the float, in whole tokens.
    pub funds_reserve: u64,
    /// Cap on cumulative team reservations from the float, in whole tokens.
    pub team_cap: u64,
    /// Caller eligibility for unlocking vesting holders.
    pub unlock_policy: UnlockPolicy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::saifu()
    }
}

impl TokenConfig {
    /// The Saifu distribution: 200M supply, 130M sale, 20M funds, 50M team.
    #[must_use]
    pub fn saifu() -> Self {
        Self {
            name: constants::NAME.to_string(),
            symbol: constants::SYMBOL.to_string(),
            decimals: constants::DECIMALS,
            initial_supply: 200_000_000,
            sale_allocation: 130_000_000,
            funds_reserve: 20_000_000,
            team_cap: 50_000_000,
            unlock_policy: UnlockPolicy::Anyone,
        }
    }

    /// Same distribution with a different unlock policy.
    #[must_use]
    pub fn with_unlock_policy(mut self, policy: UnlockPolicy) -> Self {
        self.unlock_policy = policy;
        self
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to the Saifu defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SaifuError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the distribution is internally consistent.
    ///
    /// # Errors
    /// Returns [`SaifuError::Configuration`] if the decimals overflow 256-bit
    /// amounts, the supply is zero, or the sale allocation plus the float
    /// reservations exceed the supply.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.symbol.is_empty() {
            return Err(SaifuError::Configuration(
                "name and symbol must be non-empty".into(),
            ));
        }
        // 10^77 is the largest power of ten below 2^256.
        if self.decimals > 77 {
            return Err(SaifuError::Configuration(format!(
                "decimals {} exceed 256-bit range",
                self.decimals
            )));
        }
        if self.initial_supply == 0 {
            return Err(SaifuError::Configuration("initial supply is zero".into()));
        }
        let committed = u128::from(self.sale_allocation)
            + u128::from(self.funds_reserve)
            + u128::from(self.team_cap);
        if committed > u128::from(self.initial_supply) {
            return Err(SaifuError::Configuration(format!(
                "sale {} + funds {} + team {} exceed supply {}",
                self.sale_allocation, self.funds_reserve, self.team_cap, self.initial_supply
            )));
        }
        self.base_units(self.initial_supply)
            .map_err(|_| SaifuError::Configuration("supply exceeds 256-bit range".into()))?;
        Ok(())
    }

    /// Convert whole tokens into base units for this configuration.
    pub fn base_units(&self, whole: u64) -> Result<Amount> {
        math::checked_mul(
            Amount::from(whole),
            Amount::exp10(usize::from(self.decimals)),
        )
    }

    /// Total supply in base units.
    pub fn initial_supply_units(&self) -> Result<Amount> {
        self.base_units(self.initial_supply)
    }

    /// Sale allocation in base units.
    pub fn sale_allocation_units(&self) -> Result<Amount> {
        self.base_units(self.sale_allocation)
    }

    /// Funds reserve in base units.
    pub fn funds_reserve_units(&self) -> Result<Amount> {
        self.base_units(self.funds_reserve)
    }

    /// Team cap in base units.
    pub fn team_cap_units(&self) -> Result<Amount> {
        self.base_units(self.team_cap)
    }
}
