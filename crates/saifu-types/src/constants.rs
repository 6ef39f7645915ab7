//! Token parameters and the initial distribution.
//!
//! Amounts are given in base units as `u128` so they can be `const`;
//! convert with `Amount::from(...)`.

/// Token name.
pub const NAME: &str = "Saifu";

/// Token symbol.
pub const SYMBOL: &str = "SFU";

/// Decimal places of the base unit.
pub const DECIMALS: u8 = 18;

/// Base units per whole token.
pub const UNIT: u128 = 10u128.pow(DECIMALS as u32);

/// Total supply minted at creation (200M tokens).
pub const INITIAL_TOTAL_SUPPLY: u128 = 200_000_000 * UNIT;

/// Credited to the controller at creation for the public sale (130M tokens).
pub const AMOUNT_TOKENS_FOR_SELL: u128 = 130_000_000 * UNIT;

/// One-shot payout for the funds reserve (20M tokens).
pub const RESERVED_FOR_FUNDS: u128 = 20_000_000 * UNIT;

/// Cap on cumulative team reservations (50M tokens).
pub const RESERVED_FOR_TEAM: u128 = 50_000_000 * UNIT;

/// Half a year of 365 days, in seconds.
pub const HALF_YEAR: u64 = 182 * 86_400 + 43_200;

/// One year of 365 days, in seconds.
pub const YEAR: u64 = 365 * 86_400;

/// Domain tag for vesting holder addresses.
pub const HOLDER_DOMAIN: &[u8] = b"saifu:holder:v1:";

/// Domain tag for the token's own address (its internal float).
pub const TOKEN_DOMAIN: &[u8] = b"saifu:token:v1:";

/// Domain tag for the state digest.
pub const DIGEST_DOMAIN: &[u8] = b"saifu:state:v1:";
