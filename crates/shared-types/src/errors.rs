//! # Error Types
//!
//! Closed failure taxonomy shared by the vault, relayer and guard.
//!
//! The display strings of the relayer/vault variants are stable identifiers
//! that keepers match on. A failed hash validation is NOT an error: it is
//! reported as `Ok(false)` by the vault and as a skipped outcome by the
//! relayer.

use crate::value_objects::{Address, U256};
use thiserror::Error;

/// Hard failures. Any of these aborts the whole operation with no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StealthError {
    /// Target job is not whitelisted.
    #[error("SR: invalid job")]
    InvalidJob,

    /// Execution block does not match the block the hash is bound to.
    #[error("ST: wrong block")]
    WrongBlock {
        /// Block the caller targeted.
        expected: u64,
        /// Block the transaction landed in.
        actual: u64,
    },

    /// The call chain does not look like a direct EOA call.
    #[error("SV: eoa gas check failed")]
    EoaCheckFailed {
        /// Gas observed at the check.
        gas_left: u64,
        /// Minimum gas a direct call would have.
        required: u64,
    },

    /// Governance forbids the unprotected entry point.
    #[error("SR: block protection required")]
    BlockProtectionRequired,

    /// Job is already in the registry.
    #[error("SR: job already added")]
    JobAlreadyAdded(Address),

    /// Job is not in the registry.
    #[error("SR: job not found")]
    JobNotFound(Address),

    /// Calling contract has not been enabled by the caller.
    #[error("SV: contract not enabled")]
    ContractNotEnabled {
        /// Keeper whose hash is being validated.
        caller: Address,
        /// Contract presenting the hash.
        contract: Address,
    },

    /// The job call failed; reason is propagated verbatim.
    #[error("{0}")]
    JobReverted(String),

    /// Attached value does not cover the requested payment.
    #[error("insufficient value: required {required}, provided {provided}")]
    InsufficientValue {
        /// Payment requested.
        required: U256,
        /// Value attached to the call.
        provided: U256,
    },

    /// Native value transfer failed.
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// A zero address was supplied where a real one is required.
    #[error("ZeroAddress")]
    ZeroAddress,

    /// A zero amount was supplied where a positive one is required.
    #[error("ZeroAmount")]
    ZeroAmount,

    /// Caller is not governance.
    #[error("NotAuthorized")]
    NotAuthorized,

    /// Executor already present (add) or absent (remove).
    #[error("InvalidExecutor")]
    InvalidExecutor,

    /// Sender is not an executor.
    #[error("NotExecutor")]
    NotExecutor,

    /// Transaction did not come through the stealth relayer on behalf of an executor.
    #[error("NotStealthRelayer")]
    NotStealthRelayer,

    /// No governance transfer is pending for the caller.
    #[error("NotPendingGovernor")]
    NotPendingGovernor,
}

impl StealthError {
    /// Returns true for failures caused by configuration rather than by the keeper.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ZeroAddress
                | Self::ZeroAmount
                | Self::NotAuthorized
                | Self::JobAlreadyAdded(_)
                | Self::JobNotFound(_)
                | Self::InvalidExecutor
                | Self::NotPendingGovernor
        )
    }
}

impl From<JobError> for StealthError {
    fn from(err: JobError) -> Self {
        Self::JobReverted(err.to_string())
    }
}

// =============================================================================
// JOB ERRORS
// =============================================================================

/// Failure reported by a job invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// The job reverted with a reason string.
    #[error("{0}")]
    Reverted(String),

    /// The target has no code to run.
    #[error("Address: call to non-contract")]
    NotAContract(Address),
}

// =============================================================================
// TRANSFER ERRORS
// =============================================================================

/// Native value transfer failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// Sender balance is too low.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount requested.
        required: U256,
        /// Amount held.
        available: U256,
    },

    /// Recipient balance would overflow.
    #[error("balance overflow")]
    Overflow,
}

// =============================================================================
// TESTS
// =============================================================================
