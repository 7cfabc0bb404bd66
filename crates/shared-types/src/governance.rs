//! # Governance Capability
//!
//! Single trusted identity allowed to mutate whitelist, configuration and
//! executor state. Every governance-only operation takes the authenticated
//! caller from its `CallContext` and checks it here.
//!
//! Handover is two-step: the current governor nominates, the nominee accepts.

use crate::errors::StealthError;
use crate::value_objects::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Governance identity with an optional pending successor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Governance {
    governor: Address,
    pending_governor: Option<Address>,
}

impl Governance {
    /// Creates a governance capability held by `governor`.
    pub fn new(governor: Address) -> Result<Self, StealthError> {
        if governor.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        Ok(Self {
            governor,
            pending_governor: None,
        })
    }

    /// Current governor.
    #[must_use]
    pub fn governor(&self) -> Address {
        self.governor
    }

    /// Nominated successor, if any.
    #[must_use]
    pub fn pending_governor(&self) -> Option<Address> {
        self.pending_governor
    }

    /// Fails with `NotAuthorized` unless `caller` is the governor.
    pub fn ensure_governor(&self, caller: Address) -> Result<(), StealthError> {
        if caller == self.governor {
            Ok(())
        } else {
            Err(StealthError::NotAuthorized)
        }
    }

    /// Nominates a new governor. Governance-only.
    pub fn set_pending_governor(
        &mut self,
        caller: Address,
        pending: Address,
    ) -> Result<(), StealthError> {
        self.ensure_governor(caller)?;
        if pending.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        info!(governor = %self.governor, pending = %pending, "Pending governor set");
        self.pending_governor = Some(pending);
        Ok(())
    }

    /// Completes the handover. Only the nominee may call this.
    pub fn accept_governor(&mut self, caller: Address) -> Result<(), StealthError> {
        if self.pending_governor != Some(caller) {
            return Err(StealthError::NotPendingGovernor);
        }
        info!(old = %self.governor, new = %caller, "Governor accepted");
        self.governor = caller;
        self.pending_governor = None;
        Ok(())
    }
}
