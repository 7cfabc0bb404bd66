//! # Driving Port (API - Inbound)

use crate::domain::entities::SafeTransaction;
use shared_types::{Address, Hash, StealthError};

/// Pre/post execution hook of a multisig wallet.
pub trait TransactionGuard: Send + Sync {
    /// Approves or rejects `tx` about to be executed by `msg_sender`.
    fn check_transaction(
        &self,
        tx: &SafeTransaction,
        msg_sender: Address,
    ) -> Result<(), StealthError>;

    /// Called after execution with the transaction hash and outcome.
    fn check_after_execution(&self, tx_hash: Hash, success: bool) -> Result<(), StealthError>;
}
