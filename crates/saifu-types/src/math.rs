//! Numeric safety layer.
//!
//! Every balance, allowance and counter is a 256-bit unsigned [`Amount`].
//! Arithmetic on amounts goes through the helpers below, which fail with
//! [`SaifuError::ArithmeticFault`] instead of wrapping. No wrapped value is
//! ever observable outside this module.

use primitive_types::U256;

use crate::{constants, Result, SaifuError};

/// Unsigned 256-bit token amount in base units.
pub type Amount = U256;

/// `a + b`, or `ArithmeticFault` on overflow.
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b).ok_or(SaifuError::ArithmeticFault { op: "add" })
}

/// `a - b`, or `ArithmeticFault` when `b > a`.
pub fn checked_sub(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_sub(b).ok_or(SaifuError::ArithmeticFault { op: "sub" })
}

/// `a * b`, or `ArithmeticFault` on overflow.
pub fn checked_mul(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_mul(b).ok_or(SaifuError::ArithmeticFault { op: "mul" })
}

/// Sum of an iterator of amounts, failing on the first overflow.
pub fn checked_sum<I>(amounts: I) -> Result<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    amounts.into_iter().try_fold(Amount::zero(), checked_add)
}

/// `whole * 10^DECIMALS`: a whole-token count in base units.
pub fn tokens(whole: u64) -> Result<Amount> {
    checked_mul(
        Amount::from(whole),
        Amount::exp10(usize::from(constants::DECIMALS)),
    )
}
