//! # Core Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Address, AddressSet, Bytes, StealthError, U256};

// =============================================================================
// GUARD CONFIGURATION
// =============================================================================

/// Governance flags of the guard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Approve every transaction.
    pub override_guard_checks: bool,
    /// Only approve transactions sent by the stealth relayer for an executor.
    pub verify_stealth_relayer: bool,
}

// =============================================================================
// EXECUTOR SET
// =============================================================================

/// Addresses allowed to execute guarded transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSet {
    executors: AddressSet,
}

impl ExecutorSet {
    /// Whether `account` is an executor.
    #[must_use]
    pub fn contains(&self, account: &Address) -> bool {
        self.executors.contains(account)
    }

    /// Executors in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Address> {
        self.executors.to_vec()
    }

    /// Adds all of `executors`, or none of them.
    pub fn add(&mut self, executors: &[Address]) -> Result<(), StealthError> {
        let mut staged = self.executors.clone();
        for executor in executors {
            if executor.is_zero() {
                return Err(StealthError::ZeroAddress);
            }
            if !staged.insert(*executor) {
                return Err(StealthError::InvalidExecutor);
            }
        }
        self.executors = staged;
        Ok(())
    }

    /// Removes all of `executors`, or none of them.
    pub fn remove(&mut self, executors: &[Address]) -> Result<(), StealthError> {
        let mut staged = self.executors.clone();
        for executor in executors {
            if executor.is_zero() {
                return Err(StealthError::ZeroAddress);
            }
            if !staged.remove(executor) {
                return Err(StealthError::InvalidExecutor);
            }
        }
        self.executors = staged;
        Ok(())
    }
}

// =============================================================================
// SAFE TRANSACTION
// =============================================================================

/// How the multisig executes the call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Regular call.
    #[default]
    Call,
    /// Delegate call.
    DelegateCall,
}

/// A pending multisig transaction as presented to the guard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransaction {
    /// Call target.
    pub to: Address,
    /// Native value sent.
    pub value: U256,
    /// Call data.
    pub data: Bytes,
    /// Call kind.
    pub operation: Operation,
    /// Gas reserved for the inner call.
    pub safe_tx_gas: u64,
    /// Gas independent of the inner call.
    pub base_gas: u64,
    /// Gas price used for the refund.
    pub gas_price: U256,
    /// Refund token (zero for native).
    pub gas_token: Address,
    /// Refund receiver.
    pub refund_receiver: Address,
    /// Packed owner signatures.
    pub signatures: Bytes,
}
