//! # Stealth Relayer Service
//!
//! Runs whitelisted jobs on behalf of keepers, each call gated by:
//!
//! 1. job validity (`SR: invalid job`)
//! 2. block binding, on the protected entry points (`ST: wrong block`)
//! 3. the vault's hash validation; a rejected hash skips the call silently
//!
//! Only then is the job invoked. A job failure aborts the call with the
//! job's own reason, and the vault never records the hash as validated.
//!
//! ## Value Flow
//!
//! The attached value is escrowed by the relayer for the duration of the
//! call. On success `payment` goes to the block coinbase and the rest to the
//! job; on a skip or any failure the keeper gets it back.
//!
//! ## Concurrency
//!
//! Executions are serialised. The keeper of the call in flight is visible
//! through `StealthRelayerView::caller` while the job runs. A job calling
//! back into the relayer deadlocks; reentrancy is unsupported.

use crate::domain::entities::{JobRegistry, RelayOutcome, RelayerConfig, StealthCall};
use crate::domain::services::{check_block, split_payment};
use crate::events::RelayerEvent;
use crate::ports::inbound::StealthRelayerView;
use crate::ports::outbound::JobResolver;
use crate::stealth_tx::StealthTx;

use parking_lot::RwLock;
use shared_types::{
    Address, Bytes, CallContext, Governance, Hash, JobError, NativeTransfer, StealthError, U256,
};
use sr_01_stealth_vault::ports::StealthVaultApi;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Counters for the relayer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelayerStats {
    /// Jobs that ran.
    pub jobs_executed: u64,
    /// Calls skipped because the vault rejected the hash.
    pub calls_skipped: u64,
    /// Calls that hard-failed.
    pub calls_failed: u64,
}

struct RelayerState {
    governance: Governance,
    stealth: StealthTx,
    force_block_protection: bool,
    registry: JobRegistry,
    events: Vec<RelayerEvent>,
    stats: RelayerStats,
}

/// Clears the recorded keeper when the job call ends, however it ends.
struct CallerScope<'a>(&'a RwLock<Option<Address>>);

impl<'a> CallerScope<'a> {
    fn enter(slot: &'a RwLock<Option<Address>>, caller: Address) -> Self {
        *slot.write() = Some(caller);
        Self(slot)
    }
}

impl Drop for CallerScope<'_> {
    fn drop(&mut self) {
        *self.0.write() = None;
    }
}

/// The stealth relayer.
pub struct StealthRelayer<J: JobResolver, B: NativeTransfer> {
    address: Address,
    jobs: Arc<J>,
    bank: Arc<B>,
    state: RwLock<RelayerState>,
    caller: RwLock<Option<Address>>,
    execution: Mutex<()>,
}

impl<J: JobResolver, B: NativeTransfer> StealthRelayer<J, B> {
    /// Creates a relayer at `address` validating through `vault`.
    pub fn new(
        address: Address,
        governor: Address,
        vault: Arc<dyn StealthVaultApi>,
        config: RelayerConfig,
        jobs: Arc<J>,
        bank: Arc<B>,
    ) -> Result<Self, StealthError> {
        if address.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        let governance = Governance::new(governor)?;
        let stealth = StealthTx::new(vault, config.penalty)?;
        info!(
            relayer = %address,
            vault = %stealth.stealth_vault(),
            penalty = %config.penalty,
            force_block_protection = config.force_block_protection,
            "Stealth relayer created"
        );
        Ok(Self {
            address,
            jobs,
            bank,
            state: RwLock::new(RelayerState {
                governance,
                stealth,
                force_block_protection: config.force_block_protection,
                registry: JobRegistry::default(),
                events: Vec::new(),
                stats: RelayerStats::default(),
            }),
            caller: RwLock::new(None),
            execution: Mutex::new(()),
        })
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Runs `job` if `hash` is valid and the call lands in `block_number`.
    pub async fn execute(
        &self,
        ctx: &CallContext,
        job: Address,
        call_data: Bytes,
        hash: Hash,
        block_number: u64,
    ) -> Result<RelayOutcome, StealthError> {
        self.execute_and_pay(ctx, job, call_data, hash, block_number, U256::zero())
            .await
    }

    /// `execute`, paying `payment` of the attached value to the coinbase.
    pub async fn execute_and_pay(
        &self,
        ctx: &CallContext,
        job: Address,
        call_data: Bytes,
        hash: Hash,
        block_number: u64,
        payment: U256,
    ) -> Result<RelayOutcome, StealthError> {
        self.relay(
            ctx,
            StealthCall {
                job,
                call_data,
                hash,
                block_number: Some(block_number),
                payment,
            },
        )
        .await
    }

    /// Runs `job` without block binding, unless governance forces it.
    pub async fn execute_without_block_protection(
        &self,
        ctx: &CallContext,
        job: Address,
        call_data: Bytes,
        hash: Hash,
    ) -> Result<RelayOutcome, StealthError> {
        self.execute_without_block_protection_and_pay(ctx, job, call_data, hash, U256::zero())
            .await
    }

    /// `execute_without_block_protection`, paying `payment` to the coinbase.
    pub async fn execute_without_block_protection_and_pay(
        &self,
        ctx: &CallContext,
        job: Address,
        call_data: Bytes,
        hash: Hash,
        payment: U256,
    ) -> Result<RelayOutcome, StealthError> {
        self.relay(
            ctx,
            StealthCall {
                job,
                call_data,
                hash,
                block_number: None,
                payment,
            },
        )
        .await
    }

    #[instrument(
        skip(self, ctx, call),
        fields(caller = %ctx.caller, job = %call.job, block = ctx.block.number)
    )]
    async fn relay(
        &self,
        ctx: &CallContext,
        call: StealthCall,
    ) -> Result<RelayOutcome, StealthError> {
        let _serial = self.execution.lock().await;
        let result = self.relay_serialised(ctx, call).await;

        let mut state = self.state.write();
        match &result {
            Ok(RelayOutcome::Executed(_)) => state.stats.jobs_executed += 1,
            Ok(RelayOutcome::Skipped) => {
                state.stats.calls_skipped += 1;
                debug!("Hash rejected by vault, call skipped");
            }
            Err(err) => {
                state.stats.calls_failed += 1;
                warn!(error = %err, "Relayed call failed");
            }
        }
        result
    }

    async fn relay_serialised(
        &self,
        ctx: &CallContext,
        call: StealthCall,
    ) -> Result<RelayOutcome, StealthError> {
        let stealth = {
            let state = self.state.read();
            Self::ensure_valid_job(&state.registry, &call.job)?;
            match call.block_number {
                Some(target) => check_block(target, ctx.block.number)?,
                None if state.force_block_protection => {
                    return Err(StealthError::BlockProtectionRequired)
                }
                None => {}
            }
            state.stealth.clone()
        };
        let (job_value, coinbase_payment) = split_payment(ctx.value, call.payment)?;

        self.bank.transfer(ctx.caller, self.address, ctx.value)?;

        let pending = match stealth.begin_stealth_tx(ctx, call.hash).await {
            Ok(pending) => pending,
            Err(err) => return self.refund(ctx, err),
        };
        let Some(pending) = pending else {
            self.bank.transfer(self.address, ctx.caller, ctx.value)?;
            return Ok(RelayOutcome::Skipped);
        };

        let Some(target) = self.jobs.resolve(&call.job) else {
            return self.refund(ctx, JobError::NotAContract(call.job).into());
        };

        let invoked = {
            let _scope = CallerScope::enter(&self.caller, ctx.caller);
            let job_frame = ctx.child_call(call.job, job_value);
            target.invoke(&job_frame, &call.call_data).await
        };
        let return_data = match invoked {
            Ok(data) => data,
            Err(err) => return self.refund(ctx, err.into()),
        };

        self.bank.transfer(self.address, call.job, job_value)?;
        self.bank.transfer(self.address, ctx.block.coinbase, coinbase_payment)?;
        stealth.commit_stealth_tx(pending).await;

        self.state.write().events.push(RelayerEvent::StealthJobExecuted {
            job: call.job,
            caller: ctx.caller,
            hash: call.hash,
            block_number: call.block_number,
            payment: coinbase_payment,
        });
        info!(returned = return_data.len(), "Stealth job executed");
        Ok(RelayOutcome::Executed(return_data))
    }

    /// Returns the escrowed value and fails with `err`.
    fn refund(&self, ctx: &CallContext, err: StealthError) -> Result<RelayOutcome, StealthError> {
        self.bank.transfer(self.address, ctx.caller, ctx.value)?;
        Err(err)
    }

    fn ensure_valid_job(registry: &JobRegistry, job: &Address) -> Result<(), StealthError> {
        if registry.contains(job) {
            Ok(())
        } else {
            Err(StealthError::InvalidJob)
        }
    }

    /// Job-validity guard on its own.
    pub fn validate_job(&self, job: Address) -> Result<(), StealthError> {
        Self::ensure_valid_job(&self.state.read().registry, &job)
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    /// Whitelists `job`. Governance-only.
    pub fn add_job(&self, ctx: &CallContext, job: Address) -> Result<(), StealthError> {
        self.add_jobs(ctx, &[job])
    }

    /// Whitelists every job in `jobs`. Governance-only, all-or-nothing.
    pub fn add_jobs(&self, ctx: &CallContext, jobs: &[Address]) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.registry.add(jobs)?;
        state.events.push(RelayerEvent::JobsAdded {
            jobs: jobs.to_vec(),
        });
        info!(count = jobs.len(), "Jobs added");
        Ok(())
    }

    /// Removes `job` from the whitelist. Governance-only.
    pub fn remove_job(&self, ctx: &CallContext, job: Address) -> Result<(), StealthError> {
        self.remove_jobs(ctx, &[job])
    }

    /// Removes every job in `jobs`. Governance-only, all-or-nothing.
    pub fn remove_jobs(&self, ctx: &CallContext, jobs: &[Address]) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.registry.remove(jobs)?;
        state.events.push(RelayerEvent::JobsRemoved {
            jobs: jobs.to_vec(),
        });
        info!(count = jobs.len(), "Jobs removed");
        Ok(())
    }

    /// Sets the penalty presented to the vault. Governance-only, non-zero.
    pub fn set_penalty(&self, ctx: &CallContext, penalty: U256) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.stealth.set_penalty(penalty)?;
        state.events.push(RelayerEvent::PenaltySet { penalty });
        info!(penalty = %penalty, "Penalty set");
        Ok(())
    }

    /// Rebinds to another vault. Governance-only, non-zero address.
    pub fn set_stealth_vault(
        &self,
        ctx: &CallContext,
        vault: Arc<dyn StealthVaultApi>,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        let address = vault.address();
        state.stealth.set_stealth_vault(vault)?;
        state
            .events
            .push(RelayerEvent::StealthVaultSet { vault: address });
        Ok(())
    }

    /// Disables (or re-enables) the unprotected entry points. Governance-only.
    pub fn set_force_block_protection(
        &self,
        ctx: &CallContext,
        enabled: bool,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.force_block_protection = enabled;
        state
            .events
            .push(RelayerEvent::ForceBlockProtectionSet { enabled });
        info!(enabled, "Force block protection set");
        Ok(())
    }

    /// Nominates a new governor. Governance-only.
    pub fn set_pending_governor(
        &self,
        ctx: &CallContext,
        pending: Address,
    ) -> Result<(), StealthError> {
        self.state
            .write()
            .governance
            .set_pending_governor(ctx.caller, pending)
    }

    /// Completes a governance handover. Nominee-only.
    pub fn accept_governor(&self, ctx: &CallContext) -> Result<(), StealthError> {
        self.state.write().governance.accept_governor(ctx.caller)
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Relayer account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current governor.
    pub fn governor(&self) -> Address {
        self.state.read().governance.governor()
    }

    /// Whitelisted jobs in insertion order.
    pub fn jobs(&self) -> Vec<Address> {
        self.state.read().registry.to_vec()
    }

    /// Whether `job` is whitelisted.
    pub fn is_job(&self, job: Address) -> bool {
        self.state.read().registry.contains(&job)
    }

    /// Penalty presented to the vault.
    pub fn penalty(&self) -> U256 {
        self.state.read().stealth.penalty()
    }

    /// Address of the vault.
    pub fn stealth_vault(&self) -> Address {
        self.state.read().stealth.stealth_vault()
    }

    /// Whether the unprotected entry points are disabled.
    pub fn force_block_protection(&self) -> bool {
        self.state.read().force_block_protection
    }

    /// Current configuration.
    pub fn config(&self) -> RelayerConfig {
        let state = self.state.read();
        RelayerConfig {
            penalty: state.stealth.penalty(),
            force_block_protection: state.force_block_protection,
        }
    }

    /// Keeper whose job is running, or `Address::ZERO`.
    pub fn caller(&self) -> Address {
        self.caller.read().unwrap_or(Address::ZERO)
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> RelayerStats {
        self.state.read().stats.clone()
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<RelayerEvent> {
        self.state.read().events.clone()
    }

    /// Takes the event log, leaving it empty.
    pub fn drain_events(&self) -> Vec<RelayerEvent> {
        std::mem::take(&mut self.state.write().events)
    }
}

impl<J: JobResolver, B: NativeTransfer> StealthRelayerView for StealthRelayer<J, B> {
    fn address(&self) -> Address {
        self.address
    }

    fn caller(&self) -> Address {
        StealthRelayer::caller(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
