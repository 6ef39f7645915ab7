//! Single-controller access gate.
//!
//! Every privileged entry point calls [`Controller::require`] before doing
//! anything else, so a rejected caller causes no state change.

use serde::{Deserialize, Serialize};

use saifu_types::{AccountId, Result, SaifuError};

/// The one identity allowed to invoke privileged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controller {
    controller: AccountId,
}

impl Controller {
    /// Create a gate owned by `controller`.
    #[must_use]
    pub fn new(controller: AccountId) -> Self {
        Self { controller }
    }

    /// The current controller.
    #[must_use]
    pub fn current(&self) -> AccountId {
        self.controller
    }

    /// Whether `caller` is the controller.
    #[must_use]
    pub fn is_controller(&self, caller: &AccountId) -> bool {
        *caller == self.controller
    }

    /// Guard a privileged call. Returns `Ok(())` if `caller` is the
    /// controller, or [`SaifuError::Unauthorized`] otherwise.
    pub fn require(&self, caller: &AccountId) -> Result<()> {
        if self.is_controller(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, "Privileged call rejected");
            Err(SaifuError::Unauthorized { caller: *caller })
        }
    }

    /// Hand control to `new_controller`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the controller
    /// - `InvalidRecipient` if `new_controller` is null
    pub fn transfer(&mut self, caller: &AccountId, new_controller: AccountId) -> Result<()> {
        self.require(caller)?;
        if new_controller.is_null() {
            return Err(SaifuError::InvalidRecipient);
        }
        tracing::info!(
            previous = %self.controller,
            next = %new_controller,
            "Control transferred"
        );
        self.controller = new_controller;
        Ok(())
    }
}
