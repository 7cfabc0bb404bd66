//! # StealthTx
//!
//! Embeddable form of the relayer's block-binding and hash-validation
//! guards. A contract that wants to self-gate one function holds a
//! `StealthTx` and asks it before doing any work, instead of routing calls
//! through a job-whitelisting relayer.
//!
//! The embedding contract must be enabled by the keeper in the vault, exactly
//! like a relayer.

use crate::domain::services::check_block;
use shared_types::{Address, CallContext, Hash, StealthError, U256};
use sr_01_stealth_vault::domain::entities::PendingValidation;
use sr_01_stealth_vault::ports::StealthVaultApi;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Vault binding and penalty of a stealth-gated contract.
#[derive(Clone)]
pub struct StealthTx {
    vault: Arc<dyn StealthVaultApi>,
    penalty: U256,
}

impl fmt::Debug for StealthTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StealthTx")
            .field("vault", &self.vault.address())
            .field("penalty", &self.penalty)
            .finish()
    }
}

impl StealthTx {
    /// Binds to `vault` with `penalty` at stake per validation.
    pub fn new(vault: Arc<dyn StealthVaultApi>, penalty: U256) -> Result<Self, StealthError> {
        let mut stealth = Self {
            vault,
            penalty: U256::zero(),
        };
        stealth.ensure_vault(stealth.vault.address())?;
        stealth.set_penalty(penalty)?;
        Ok(stealth)
    }

    fn ensure_vault(&self, address: Address) -> Result<(), StealthError> {
        if address.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        Ok(())
    }

    /// Address of the bound vault.
    pub fn stealth_vault(&self) -> Address {
        self.vault.address()
    }

    /// Bond at stake per validation.
    pub fn penalty(&self) -> U256 {
        self.penalty
    }

    /// Rebinds to another vault. Rejects a zero vault address.
    pub fn set_stealth_vault(
        &mut self,
        vault: Arc<dyn StealthVaultApi>,
    ) -> Result<(), StealthError> {
        self.ensure_vault(vault.address())?;
        info!(vault = %vault.address(), "Stealth vault set");
        self.vault = vault;
        Ok(())
    }

    /// Changes the penalty. Rejects zero.
    pub fn set_penalty(&mut self, penalty: U256) -> Result<(), StealthError> {
        if penalty.is_zero() {
            return Err(StealthError::ZeroAmount);
        }
        self.penalty = penalty;
        Ok(())
    }

    /// Presents `hash` on behalf of `ctx.caller`.
    ///
    /// `ctx` is the embedding contract's own frame. `Ok(false)` means the
    /// guarded function must return without doing anything.
    pub async fn validate_stealth_tx(
        &self,
        ctx: &CallContext,
        hash: Hash,
    ) -> Result<bool, StealthError> {
        let vault_frame = ctx.child_call(self.vault.address(), U256::zero());
        let valid = self
            .vault
            .validate_hash(&vault_frame, ctx.caller, hash, self.penalty)
            .await?;
        debug!(caller = %ctx.caller, valid, "Stealth hash checked");
        Ok(valid)
    }

    /// Block-binding guard followed by `validate_stealth_tx`.
    pub async fn validate_stealth_tx_and_block(
        &self,
        ctx: &CallContext,
        hash: Hash,
        block_number: u64,
    ) -> Result<bool, StealthError> {
        check_block(block_number, ctx.block.number)?;
        self.validate_stealth_tx(ctx, hash).await
    }

    /// Like `validate_stealth_tx`, but a valid hash is only recorded once the
    /// returned validation is passed to `commit_stealth_tx`.
    ///
    /// `Ok(None)` means the hash was reported and the caller slashed.
    pub async fn begin_stealth_tx(
        &self,
        ctx: &CallContext,
        hash: Hash,
    ) -> Result<Option<PendingValidation>, StealthError> {
        let vault_frame = ctx.child_call(self.vault.address(), U256::zero());
        let pending = self
            .vault
            .begin_validation(&vault_frame, ctx.caller, hash, self.penalty)
            .await?;
        debug!(caller = %ctx.caller, valid = pending.is_some(), "Stealth hash checked");
        Ok(pending)
    }

    /// Records a validation started by `begin_stealth_tx`.
    pub async fn commit_stealth_tx(&self, pending: PendingValidation) {
        self.vault.commit_validation(pending).await;
    }
}
