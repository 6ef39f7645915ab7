//! Caller-supplied time.
//!
//! The ledger never reads a clock itself. Every time-dependent operation
//! receives the current [`Timestamp`] from its caller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, SaifuError};

/// Seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Current wall-clock time, for callers that present the system clock.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Convert from a chrono datetime. Instants before the epoch clamp to 0.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(u64::try_from(dt.timestamp()).unwrap_or(0))
    }

    /// Convert to a chrono datetime, if representable.
    #[must_use]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// `self + seconds`, failing instead of wrapping.
    pub fn checked_add_secs(self, seconds: u64) -> Result<Self> {
        self.0
            .checked_add(seconds)
            .map(Self)
            .ok_or(SaifuError::ArithmeticFault { op: "time_add" })
    }

    /// Whether `release_time` has been reached at this instant.
    #[must_use]
    pub fn has_reached(self, release_time: Timestamp) -> bool {
        self >= release_time
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
