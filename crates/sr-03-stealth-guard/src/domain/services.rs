//! # Domain Services
//!
//! The approval decision, evaluated on a snapshot of guard state.

use crate::domain::entities::{ExecutorSet, GuardConfig};
use shared_types::{Address, StealthError};

/// Relayer address and the keeper it is currently running a job for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelayerSnapshot {
    /// Relayer account.
    pub address: Address,
    /// Keeper in flight, or zero.
    pub caller: Address,
}

/// Decides whether `msg_sender` may execute a guarded transaction.
///
/// With relayer verification on, direct executor calls are rejected too:
/// the only accepted path is the relayer acting for an executor.
pub fn authorize(
    config: &GuardConfig,
    executors: &ExecutorSet,
    relayer: Option<RelayerSnapshot>,
    msg_sender: Address,
) -> Result<(), StealthError> {
    if config.override_guard_checks {
        return Ok(());
    }

    if config.verify_stealth_relayer {
        return match relayer {
            Some(relayer)
                if relayer.address == msg_sender && executors.contains(&relayer.caller) =>
            {
                Ok(())
            }
            _ => Err(StealthError::NotStealthRelayer),
        };
    }

    if executors.contains(&msg_sender) {
        Ok(())
    } else {
        Err(StealthError::NotExecutor)
    }
}
