//! Error types for the Saifu ledger.
//!
//! All errors use the `SFU_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access control errors
//! - 2xx: Balance / allowance / arithmetic errors
//! - 3xx: Argument errors
//! - 4xx: Reservation and burn errors
//! - 5xx: Vesting and timelock errors
//! - 8xx: Invariant errors
//! - 9xx: General / configuration errors

use thiserror::Error;

use crate::{AccountId, Amount, Timestamp};

/// Central error enum for all Saifu ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaifuError {
    // =================================================================
    // Access Errors (1xx)
    // =================================================================
    /// The caller is not the controller.
    #[error("SFU_ERR_100: Unauthorized caller {caller}")]
    Unauthorized { caller: AccountId },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough balance to perform the operation.
    #[error("SFU_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// The spender's allowance does not cover the amount.
    #[error("SFU_ERR_201: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    /// A checked operation would overflow or underflow 256 bits.
    #[error("SFU_ERR_202: Arithmetic fault in {op}")]
    ArithmeticFault { op: &'static str },

    // =================================================================
    // Argument Errors (3xx)
    // =================================================================
    /// The destination is the null identifier.
    #[error("SFU_ERR_300: Invalid recipient: null account")]
    InvalidRecipient,

    /// Zero amount, or an amount that must match an exact value and does not.
    #[error("SFU_ERR_301: Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// A freeze period of zero where a freeze is mandatory.
    #[error("SFU_ERR_302: Invalid freeze period: must be greater than zero")]
    InvalidFreezePeriod,

    // =================================================================
    // Reservation / Burn Errors (4xx)
    // =================================================================
    /// The funds reserve has already been paid out.
    #[error("SFU_ERR_400: Funds already reserved")]
    AlreadyReserved,

    /// The team allocation cap would be exceeded.
    #[error("SFU_ERR_401: Team cap exceeded: requested {requested}, already {already}, cap {cap}")]
    CapExceeded {
        requested: Amount,
        already: Amount,
        cap: Amount,
    },

    /// No burn address has been designated.
    #[error("SFU_ERR_402: Burn address not set")]
    BurnAddressNotSet,

    // =================================================================
    // Vesting / Timelock Errors (5xx)
    // =================================================================
    /// The release time has not been reached yet.
    #[error("SFU_ERR_500: Not yet releasable: release at {release_time}, now {now}")]
    NotYetReleasable {
        release_time: Timestamp,
        now: Timestamp,
    },

    /// No holder was ever created for the beneficiary.
    #[error("SFU_ERR_501: No holder for beneficiary {0}")]
    HolderNotFound(AccountId),

    /// The beneficiary already has a locked, unreleased holder.
    #[error("SFU_ERR_502: Holder already active for beneficiary {0}")]
    HolderAlreadyActive(AccountId),

    /// The holder or timelock has already released its funds.
    #[error("SFU_ERR_503: Already released")]
    AlreadyReleased,

    /// A timelock was asked to release against a different asset.
    #[error("SFU_ERR_504: Asset mismatch: expected {expected}, got {actual}")]
    AssetMismatch {
        expected: AccountId,
        actual: AccountId,
    },

    // =================================================================
    // Invariant Errors (8xx)
    // =================================================================
    /// Supply conservation invariant violated. Critical safety alert.
    #[error("SFU_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (invalid values, unparseable document).
    #[error("SFU_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("SFU_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SaifuError>;

impl From<serde_json::Error> for SaifuError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SaifuError::Unauthorized {
            caller: AccountId::from_low_u64(7),
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("SFU_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = SaifuError::InsufficientBalance {
            needed: Amount::from(100u64),
            available: Amount::from(50u64),
        };
        let msg = format!("{err}");
        assert!(msg.contains("SFU_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn not_yet_releasable_display() {
        let err = SaifuError::NotYetReleasable {
            release_time: Timestamp(2_000),
            now: Timestamp(1_000),
        };
        let msg = format!("{err}");
        assert!(msg.contains("SFU_ERR_500"));
        assert!(msg.contains("2000"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn all_errors_have_sfu_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SaifuError::InvalidRecipient),
            Box::new(SaifuError::AlreadyReserved),
            Box::new(SaifuError::InvalidFreezePeriod),
            Box::new(SaifuError::AlreadyReleased),
            Box::new(SaifuError::ArithmeticFault { op: "add" }),
            Box::new(SaifuError::Configuration("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("SFU_ERR_"),
                "Error missing SFU_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: SaifuError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, SaifuError::Serialization(_)));
    }
}
