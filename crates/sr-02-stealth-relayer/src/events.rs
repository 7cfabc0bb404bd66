//! # Relayer Events
//!
//! A skipped call emits nothing: a keeper's rejected attempt must look like
//! any other no-op transaction.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// Event emitted by the stealth relayer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayerEvent {
    /// A job ran through the relayer.
    StealthJobExecuted {
        /// Invoked job.
        job: Address,
        /// Keeper that sent the call.
        caller: Address,
        /// Hash that was validated.
        hash: Hash,
        /// Block binding, `None` for the unprotected entry points.
        block_number: Option<u64>,
        /// Amount paid to the coinbase.
        payment: U256,
    },
    /// Jobs whitelisted.
    JobsAdded {
        /// Added jobs.
        jobs: Vec<Address>,
    },
    /// Jobs removed from the whitelist.
    JobsRemoved {
        /// Removed jobs.
        jobs: Vec<Address>,
    },
    /// Penalty changed.
    PenaltySet {
        /// New penalty.
        penalty: U256,
    },
    /// Vault changed.
    StealthVaultSet {
        /// New vault address.
        vault: Address,
    },
    /// Unprotected entry points toggled.
    ForceBlockProtectionSet {
        /// New flag.
        enabled: bool,
    },
}
