//! # Driving Port (API - Inbound)
//!
//! What a calling contract needs from the vault. Relayers and embedded
//! stealth guards hold an `Arc<dyn StealthVaultApi>`, so tests can swap in a
//! scripted vault.

use crate::domain::entities::PendingValidation;
use async_trait::async_trait;
use shared_types::{Address, CallContext, Hash, StealthError, U256};

/// Hash validation surface of the stealth vault.
#[async_trait]
pub trait StealthVaultApi: Send + Sync {
    /// Address of the vault account.
    fn address(&self) -> Address;

    /// Runs every check on `hash` for `caller`, presented by `ctx.caller`,
    /// without recording a successful validation.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(_))` - hash not reported, commit once the guarded call succeeded
    /// * `Ok(None)` - hash reported, caller slashed, call must be skipped
    /// * `Err(_)` - hard failure (EOA heuristic, unauthorized contract)
    async fn begin_validation(
        &self,
        ctx: &CallContext,
        caller: Address,
        hash: Hash,
        penalty: U256,
    ) -> Result<Option<PendingValidation>, StealthError>;

    /// Records a validation returned by `begin_validation`.
    async fn commit_validation(&self, pending: PendingValidation);

    /// Validates `hash` for `caller` and records the outcome at once.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - hash not reported, call may proceed
    /// * `Ok(false)` - hash reported, caller slashed, call must be skipped
    /// * `Err(_)` - hard failure (EOA heuristic, unauthorized contract)
    async fn validate_hash(
        &self,
        ctx: &CallContext,
        caller: Address,
        hash: Hash,
        penalty: U256,
    ) -> Result<bool, StealthError> {
        match self.begin_validation(ctx, caller, hash, penalty).await? {
            Some(pending) => {
                self.commit_validation(pending).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reporter of `hash`, if it was reported.
    async fn hash_reported_by(&self, hash: Hash) -> Option<Address>;
}
