//! # Guard Events

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Event emitted by the stealth guard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardEvent {
    /// Executors added.
    ExecutorsAdded {
        /// Added executors.
        executors: Vec<Address>,
    },
    /// Executors removed.
    ExecutorsRemoved {
        /// Removed executors.
        executors: Vec<Address>,
    },
    /// Override flag changed.
    OverrideGuardChecksSet {
        /// New flag.
        enabled: bool,
    },
    /// Relayer verification flag changed.
    VerifyStealthRelayerSet {
        /// New flag.
        enabled: bool,
    },
    /// Relayer changed.
    StealthRelayerSet {
        /// New relayer address.
        relayer: Address,
    },
}
