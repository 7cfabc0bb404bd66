//! # Vault Events
//!
//! Observable side effects of vault operations. A penalty is never surfaced
//! as an error, so `PenaltyApplied` is the only way a caller learns that a
//! validation slashed its bond.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// Event emitted by the stealth vault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    /// Native value added to a caller's bond.
    Bonded {
        /// Bonding caller.
        caller: Address,
        /// Amount added.
        amount: U256,
        /// Bond after the deposit.
        final_bond: U256,
    },
    /// A caller authorized a contract to present its hashes.
    StealthContractEnabled {
        /// Authorizing caller.
        caller: Address,
        /// Authorized contract.
        contract: Address,
    },
    /// A hash was reported as compromised.
    ReportedHash {
        /// Reported hash.
        hash: Hash,
        /// Reporter.
        reported_by: Address,
    },
    /// A hash was presented and accepted.
    ValidatedHash {
        /// Presented hash.
        hash: Hash,
        /// Caller on whose behalf it was presented.
        caller: Address,
        /// Penalty at stake.
        penalty: U256,
    },
    /// A reported hash was presented; the caller was slashed.
    PenaltyApplied {
        /// Presented hash.
        hash: Hash,
        /// Slashed caller.
        caller: Address,
        /// Amount actually slashed.
        penalty: U256,
        /// Reporter who received the bounty.
        reported_by: Address,
    },
    /// EOA heuristic toggled.
    EoaAuthCallProtectionSet {
        /// New flag.
        enabled: bool,
    },
    /// Heuristic tolerance changed.
    GasBufferSet {
        /// New buffer.
        gas_buffer: u64,
    },
}
