//! # Core Domain Entities
//!
//! Relayer configuration, the job registry and the shape of one relayed call.

use serde::{Deserialize, Serialize};
use shared_types::{Address, AddressSet, Bytes, Hash, StealthError, U256};

/// One native-currency unit (10^18 base units).
pub const ONE_UNIT: u64 = 1_000_000_000_000_000_000;

// =============================================================================
// RELAYER CONFIGURATION
// =============================================================================

/// Governance-tunable relayer parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayerConfig {
    /// Bond put at risk by each validation.
    pub penalty: U256,
    /// Whether the unprotected entry points are disabled.
    pub force_block_protection: bool,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            penalty: U256::from(ONE_UNIT),
            force_block_protection: false,
        }
    }
}

// =============================================================================
// JOB REGISTRY
// =============================================================================

/// Whitelist of job addresses the relayer will invoke.
///
/// Batch mutations are all-or-nothing: one offending entry rejects the
/// whole batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRegistry {
    jobs: AddressSet,
}

impl JobRegistry {
    /// Whether `job` is whitelisted.
    #[must_use]
    pub fn contains(&self, job: &Address) -> bool {
        self.jobs.contains(job)
    }

    /// Whitelisted jobs in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Address> {
        self.jobs.to_vec()
    }

    /// Adds every job in `jobs`.
    pub fn add(&mut self, jobs: &[Address]) -> Result<(), StealthError> {
        let mut staged = self.jobs.clone();
        for job in jobs {
            if job.is_zero() {
                return Err(StealthError::ZeroAddress);
            }
            if !staged.insert(*job) {
                return Err(StealthError::JobAlreadyAdded(*job));
            }
        }
        self.jobs = staged;
        Ok(())
    }

    /// Removes every job in `jobs`.
    pub fn remove(&mut self, jobs: &[Address]) -> Result<(), StealthError> {
        let mut staged = self.jobs.clone();
        for job in jobs {
            if !staged.remove(job) {
                return Err(StealthError::JobNotFound(*job));
            }
        }
        self.jobs = staged;
        Ok(())
    }
}

// =============================================================================
// RELAYED CALL
// =============================================================================

/// A keeper's request to run `job` with `call_data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StealthCall {
    /// Whitelisted target.
    pub job: Address,
    /// Opaque payload for the job.
    pub call_data: Bytes,
    /// Stealth hash presented to the vault.
    pub hash: Hash,
    /// Block the call is bound to; `None` for the unprotected entry points.
    pub block_number: Option<u64>,
    /// Part of the attached value paid to the block coinbase.
    pub payment: U256,
}

/// Result of a relayed call that did not hard-fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The job ran and returned these bytes.
    Executed(Bytes),
    /// The vault rejected the hash; nothing ran.
    Skipped,
}

impl RelayOutcome {
    /// Returns true if the job ran.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }

    /// Job return data, if it ran.
    #[must_use]
    pub fn return_data(&self) -> Option<&Bytes> {
        match self {
            Self::Executed(data) => Some(data),
            Self::Skipped => None,
        }
    }
}
