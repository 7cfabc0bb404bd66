//! # Stealth Guard Service
//!
//! Transaction guard for a multisig wallet. A transaction is approved when:
//!
//! - the override flag is set, or
//! - relayer verification is off and the sender is an executor, or
//! - relayer verification is on, the sender is the stealth relayer and the
//!   keeper the relayer is acting for is an executor.
//!
//! Everything else is rejected with `NotExecutor` or `NotStealthRelayer`.

use crate::domain::entities::{ExecutorSet, GuardConfig, SafeTransaction};
use crate::domain::services::{authorize, RelayerSnapshot};
use crate::events::GuardEvent;
use crate::ports::inbound::TransactionGuard;
use crate::ports::outbound::StealthRelayerView;

use parking_lot::RwLock;
use shared_types::{Address, CallContext, Governance, Hash, StealthError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

struct GuardState {
    governance: Governance,
    config: GuardConfig,
    executors: ExecutorSet,
    relayer: Option<Arc<dyn StealthRelayerView>>,
    events: Vec<GuardEvent>,
}

/// The stealth guard.
pub struct StealthGuard {
    state: RwLock<GuardState>,
}

impl StealthGuard {
    /// Creates a guard governed by `governor`.
    pub fn new(governor: Address, config: GuardConfig) -> Result<Self, StealthError> {
        let governance = Governance::new(governor)?;
        info!(
            governor = %governor,
            override_guard_checks = config.override_guard_checks,
            verify_stealth_relayer = config.verify_stealth_relayer,
            "Stealth guard created"
        );
        Ok(Self {
            state: RwLock::new(GuardState {
                governance,
                config,
                executors: ExecutorSet::default(),
                relayer: None,
                events: Vec::new(),
            }),
        })
    }

    // =========================================================================
    // GUARD HOOKS
    // =========================================================================

    /// Approves or rejects `tx` about to be executed by `msg_sender`.
    #[instrument(skip(self, tx), fields(to = %tx.to))]
    pub fn check_transaction(
        &self,
        tx: &SafeTransaction,
        msg_sender: Address,
    ) -> Result<(), StealthError> {
        let state = self.state.read();
        let relayer = state.relayer.as_ref().map(|relayer| RelayerSnapshot {
            address: relayer.address(),
            caller: relayer.caller(),
        });

        match authorize(&state.config, &state.executors, relayer, msg_sender) {
            Ok(()) => {
                debug!("Transaction approved");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Transaction rejected");
                Err(err)
            }
        }
    }

    /// Post-execution hook. Accepts everything.
    pub fn check_after_execution(&self, tx_hash: Hash, success: bool) -> Result<(), StealthError> {
        debug!(tx_hash = %tx_hash, success, "Transaction executed");
        Ok(())
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    /// Adds `executor`. Governance-only.
    pub fn add_executor(&self, ctx: &CallContext, executor: Address) -> Result<(), StealthError> {
        self.add_executors(ctx, &[executor])
    }

    /// Adds every executor in `executors`. Governance-only, all-or-nothing.
    pub fn add_executors(
        &self,
        ctx: &CallContext,
        executors: &[Address],
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.executors.add(executors)?;
        state.events.push(GuardEvent::ExecutorsAdded {
            executors: executors.to_vec(),
        });
        info!(count = executors.len(), "Executors added");
        Ok(())
    }

    /// Removes `executor`. Governance-only.
    pub fn remove_executor(
        &self,
        ctx: &CallContext,
        executor: Address,
    ) -> Result<(), StealthError> {
        self.remove_executors(ctx, &[executor])
    }

    /// Removes every executor in `executors`. Governance-only, all-or-nothing.
    pub fn remove_executors(
        &self,
        ctx: &CallContext,
        executors: &[Address],
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.executors.remove(executors)?;
        state.events.push(GuardEvent::ExecutorsRemoved {
            executors: executors.to_vec(),
        });
        info!(count = executors.len(), "Executors removed");
        Ok(())
    }

    /// Approve-everything switch. Governance-only.
    pub fn set_override_guard_checks(
        &self,
        ctx: &CallContext,
        enabled: bool,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.config.override_guard_checks = enabled;
        state
            .events
            .push(GuardEvent::OverrideGuardChecksSet { enabled });
        info!(enabled, "Override guard checks set");
        Ok(())
    }

    /// Requires transactions to come through the relayer. Governance-only.
    pub fn set_verify_stealth_relayer(
        &self,
        ctx: &CallContext,
        enabled: bool,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.config.verify_stealth_relayer = enabled;
        state
            .events
            .push(GuardEvent::VerifyStealthRelayerSet { enabled });
        info!(enabled, "Verify stealth relayer set");
        Ok(())
    }

    /// Sets the trusted relayer. Governance-only, non-zero address.
    pub fn set_stealth_relayer(
        &self,
        ctx: &CallContext,
        relayer: Arc<dyn StealthRelayerView>,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        let address = relayer.address();
        if address.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        state.relayer = Some(relayer);
        state
            .events
            .push(GuardEvent::StealthRelayerSet { relayer: address });
        info!(relayer = %address, "Stealth relayer set");
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

    /// Current governor.
    pub fn governor(&self) -> Address {
        self.state.read().governance.governor()
    }

    /// Executors in insertion order.
    pub fn executors(&self) -> Vec<Address> {
        self.state.read().executors.to_vec()
    }

    /// Whether `account` is an executor.
    pub fn is_executor(&self, account: Address) -> bool {
        self.state.read().executors.contains(&account)
    }

    /// Current flags.
    pub fn config(&self) -> GuardConfig {
        self.state.read().config.clone()
    }

    /// Trusted relayer address, if set.
    pub fn stealth_relayer(&self) -> Option<Address> {
        self.state.read().relayer.as_ref().map(|relayer| relayer.address())
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<GuardEvent> {
        self.state.read().events.clone()
    }

    /// Takes the event log, leaving it empty.
    pub fn drain_events(&self) -> Vec<GuardEvent> {
        std::mem::take(&mut self.state.write().events)
    }
}

impl TransactionGuard for StealthGuard {
    fn check_transaction(
        &self,
        tx: &SafeTransaction,
        msg_sender: Address,
    ) -> Result<(), StealthError> {
        StealthGuard::check_transaction(self, tx, msg_sender)
    }

    fn check_after_execution(&self, tx_hash: Hash, success: bool) -> Result<(), StealthError> {
        StealthGuard::check_after_execution(self, tx_hash, success)
    }
}

// =============================================================================
// TESTS
// =============================================================================
