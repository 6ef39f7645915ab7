//! One-shot funds reserve and capped team allocation.
//!
//! Like a settlement idempotency guard: the funds reserve can be paid out
//! exactly once, and the team counter only ever grows up to its cap.
//! Checks and commits are split so the token can run every fallible step
//! of an operation before the first write.

use serde::{Deserialize, Serialize};

use saifu_types::{math, Amount, Result, SaifuError};

/// Reservation flags and counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationState {
    /// Size of the one-shot funds payout.
    funds_reserve: Amount,
    /// Whether the funds payout has happened.
    funds_reserved: bool,
    /// Cap on cumulative team reservations.
    team_cap: Amount,
    /// Cumulative team reservations so far.
    already_reserved_for_team: Amount,
}

impl ReservationState {
    #[must_use]
    pub fn new(funds_reserve: Amount, team_cap: Amount) -> Self {
        Self {
            funds_reserve,
            funds_reserved: false,
            team_cap,
            already_reserved_for_team: Amount::zero(),
        }
    }

    /// Rebuild from persisted values.
    ///
    /// # Errors
    /// Returns `CapExceeded` if the persisted team total is above the cap.
    pub fn restore(
        funds_reserve: Amount,
        funds_reserved: bool,
        team_cap: Amount,
        already_reserved_for_team: Amount,
    ) -> Result<Self> {
        if already_reserved_for_team > team_cap {
            return Err(SaifuError::CapExceeded {
                requested: Amount::zero(),
                already: already_reserved_for_team,
                cap: team_cap,
            });
        }
        Ok(Self {
            funds_reserve,
            funds_reserved,
            team_cap,
            already_reserved_for_team,
        })
    }

    #[must_use]
    pub fn funds_reserve(&self) -> Amount {
        self.funds_reserve
    }

    #[must_use]
    pub fn is_funds_reserved(&self) -> bool {
        self.funds_reserved
    }

    #[must_use]
    pub fn team_cap(&self) -> Amount {
        self.team_cap
    }

    #[must_use]
    pub fn already_reserved_for_team(&self) -> Amount {
        self.already_reserved_for_team
    }

    /// Team allocation still available under the cap.
    #[must_use]
    pub fn team_remaining(&self) -> Amount {
        self.team_cap.saturating_sub(self.already_reserved_for_team)
    }

    /// Fail if the funds reserve was already paid out.
    pub fn check_funds(&self) -> Result<()> {
        if self.funds_reserved {
            return Err(SaifuError::AlreadyReserved);
        }
        Ok(())
    }

    /// Mark the funds reserve as paid. Irreversible.
    pub fn mark_funds_reserved(&mut self) {
        self.funds_reserved = true;
    }

    /// Compute the team total after reserving `amount`, without committing.
    ///
    /// # Errors
    /// Returns `CapExceeded` if the new total exceeds the cap, including
    /// when the addition itself overflows.
    pub fn check_team(&self, amount: Amount) -> Result<Amount> {
        let exceeded = || SaifuError::CapExceeded {
            requested: amount,
            already: self.already_reserved_for_team,
            cap: self.team_cap,
        };
        let total = math::checked_add(self.already_reserved_for_team, amount)
            .map_err(|_| exceeded())?;
        if total > self.team_cap {
            return Err(exceeded());
        }
        Ok(total)
    }

    /// Commit a total previously returned by [`check_team`](Self::check_team).
    pub fn commit_team(&mut self, total: Amount) {
        debug_assert!(total >= self.already_reserved_for_team && total <= self.team_cap);
        self.already_reserved_for_team = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(n: u64) -> Amount {
        Amount::from(n)
    }

    #[test]
    fn funds_reserve_is_one_shot() {
        let mut rs = ReservationState::new(amt(20), amt(50));
        assert!(rs.check_funds().is_ok());
        rs.mark_funds_reserved();
        assert_eq!(rs.check_funds().unwrap_err(), SaifuError::AlreadyReserved);
        assert!(rs.is_funds_reserved());
    }

    #[test]
    fn team_accumulates_up_to_cap() {
        let mut rs = ReservationState::new(amt(20), amt(50));
        let total = rs.check_team(amt(30)).unwrap();
        rs.commit_team(total);
        let total = rs.check_team(amt(20)).unwrap();
        rs.commit_team(total);
        assert_eq!(rs.already_reserved_for_team(), amt(50));
        assert_eq!(rs.team_remaining(), Amount::zero());
    }

    #[test]
    fn team_over_cap_rejected_without_change() {
        let mut rs = ReservationState::new(amt(20), amt(50));
        let total = rs.check_team(amt(40)).unwrap();
        rs.commit_team(total);

        let err = rs.check_team(amt(11)).unwrap_err();
        assert_eq!(
            err,
            SaifuError::CapExceeded {
                requested: amt(11),
                already: amt(40),
                cap: amt(50),
            }
        );
        assert_eq!(rs.already_reserved_for_team(), amt(40));
    }

    #[test]
    fn team_overflow_reports_cap_exceeded() {
        let mut rs = ReservationState::new(amt(0), Amount::MAX);
        let total = rs.check_team(amt(1)).unwrap();
        rs.commit_team(total);
        let err = rs.check_team(Amount::MAX).unwrap_err();
        assert!(matches!(err, SaifuError::CapExceeded { .. }));
    }

    #[test]
    fn restore_rejects_total_above_cap() {
        assert!(ReservationState::restore(amt(1), true, amt(5), amt(6)).is_err());
        let rs = ReservationState::restore(amt(1), true, amt(5), amt(5)).unwrap();
        assert!(rs.is_funds_reserved());
        assert_eq!(rs.already_reserved_for_team(), amt(5));
    }
}
