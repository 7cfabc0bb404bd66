//! # Stealth Vault Service
//!
//! Stateful vault component. Owns the bond ledger, the caller registry, the
//! stealth authorizations and the hash-report book behind a single lock, so
//! every operation is one atomic state transition.
//!
//! ## Security
//!
//! - Identity comes from `CallContext.caller` only
//! - `validate_hash` is honoured only for contracts the caller enabled
//! - Governance setters check `Governance::ensure_governor`

use crate::domain::entities::{
    BondLedger, CallerRegistry, HashReportBook, PenaltyDistribution, PendingValidation,
    VaultConfig,
};
use crate::domain::invariants::{check_ledger_invariant, check_penalty_conservation};
use crate::domain::services::{check_eoa_gas, split_penalty};
use crate::events::VaultEvent;
use crate::ports::inbound::StealthVaultApi;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{
    Address, CallContext, Governance, Hash, InMemoryBank, NativeTransfer, StealthError, U256,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Counters for the vault.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VaultStats {
    /// Hashes accepted by `validate_hash`.
    pub hashes_validated: u64,
    /// Validations that slashed a bond.
    pub penalties_applied: u64,
    /// New hash reports.
    pub hashes_reported: u64,
    /// Validations rejected by the EOA heuristic.
    pub eoa_rejections: u64,
}

#[derive(Debug)]
struct VaultState {
    governance: Governance,
    config: VaultConfig,
    ledger: BondLedger,
    registry: CallerRegistry,
    reports: HashReportBook,
    events: Vec<VaultEvent>,
    stats: VaultStats,
}

/// The stealth vault.
///
/// Holds native value on behalf of keepers. A keeper's bond is what it puts
/// at risk each time one of its enabled contracts presents a stealth hash.
pub struct StealthVault<B: NativeTransfer> {
    address: Address,
    bank: Arc<B>,
    state: RwLock<VaultState>,
}

impl<B: NativeTransfer> StealthVault<B> {
    /// Creates a vault deployed at `address` and governed by `governor`.
    pub fn new(
        address: Address,
        governor: Address,
        config: VaultConfig,
        bank: Arc<B>,
    ) -> Result<Self, StealthError> {
        if address.is_zero() {
            return Err(StealthError::ZeroAddress);
        }
        let governance = Governance::new(governor)?;
        info!(
            vault = %address,
            governor = %governor,
            eoa_protection = config.eoa_auth_call_protection,
            gas_buffer = config.gas_buffer,
            "Stealth vault created"
        );
        Ok(Self {
            address,
            bank,
            state: RwLock::new(VaultState {
                governance,
                config,
                ledger: BondLedger::default(),
                registry: CallerRegistry::default(),
                reports: HashReportBook::default(),
                events: Vec::new(),
                stats: VaultStats::default(),
            }),
        })
    }

    // =========================================================================
    // BONDING
    // =========================================================================

    /// Bonds the value attached to `ctx`. Returns the caller's new bond.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, amount = %ctx.value))]
    pub fn bond(&self, ctx: &CallContext) -> Result<U256, StealthError> {
        if ctx.value.is_zero() {
            return Err(StealthError::ZeroAmount);
        }

        let mut state = self.state.write();
        self.bank.transfer(ctx.caller, self.address, ctx.value)?;

        let final_bond = state.ledger.credit(ctx.caller, ctx.value);
        state.registry.register(ctx.caller);
        state.events.push(VaultEvent::Bonded {
            caller: ctx.caller,
            amount: ctx.value,
            final_bond,
        });
        debug_assert!(check_ledger_invariant(&state.ledger));

        info!(final_bond = %final_bond, "Bonded");
        Ok(final_bond)
    }

    /// Lets `contract` present hashes on behalf of `ctx.caller`.
    ///
    /// Re-enabling an already enabled contract has no effect.
    pub fn enable_stealth_contract(
        &self,
        ctx: &CallContext,
        contract: Address,
    ) -> Result<(), StealthError> {
        self.enable_stealth_contracts(ctx, &[contract])
    }

    /// Batch form of `enable_stealth_contract`. All-or-nothing.
    pub fn enable_stealth_contracts(
        &self,
        ctx: &CallContext,
        contracts: &[Address],
    ) -> Result<(), StealthError> {
        if contracts.iter().any(Address::is_zero) {
            return Err(StealthError::ZeroAddress);
        }

        let mut state = self.state.write();
        state.registry.register(ctx.caller);
        for contract in contracts {
            if state.registry.enable(ctx.caller, *contract) {
                info!(caller = %ctx.caller, contract = %contract, "Stealth contract enabled");
                state.events.push(VaultEvent::StealthContractEnabled {
                    caller: ctx.caller,
                    contract: *contract,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // HASH PROTOCOL
    // =========================================================================

    /// Validates `hash` for `caller`, presented by the contract `ctx.caller`.
    ///
    /// A reported hash slashes `min(bond, penalty)` from `caller`: 1/10 to the
    /// reporter, the rest to governance. That outcome is `Ok(false)`, never an
    /// error.
    pub fn validate_hash(
        &self,
        ctx: &CallContext,
        caller: Address,
        hash: Hash,
        penalty: U256,
    ) -> Result<bool, StealthError> {
        match self.begin_validation(ctx, caller, hash, penalty)? {
            Some(pending) => {
                self.commit_validation(pending);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Checks `hash` like `validate_hash` but leaves a successful validation
    /// unrecorded until `commit_validation`.
    ///
    /// Penalties and failed checks take effect immediately.
    #[instrument(skip(self, ctx), fields(contract = %ctx.caller, gas_left = ctx.gas_left))]
    pub fn begin_validation(
        &self,
        ctx: &CallContext,
        caller: Address,
        hash: Hash,
        penalty: U256,
    ) -> Result<Option<PendingValidation>, StealthError> {
        let mut state = self.state.write();

        if state.config.eoa_auth_call_protection {
            if let Err(err) = check_eoa_gas(
                ctx.gas_left,
                ctx.block.gas_limit,
                state.config.gas_buffer,
            ) {
                warn!(error = ?err, "EOA gas check failed");
                state.stats.eoa_rejections += 1;
                return Err(err);
            }
        }

        if !state.registry.is_enabled(&caller, &ctx.caller) {
            warn!(caller = %caller, "Validation from a contract the caller never enabled");
            return Err(StealthError::ContractNotEnabled {
                caller,
                contract: ctx.caller,
            });
        }

        let Some(reporter) = state.reports.reported_by(&hash) else {
            debug!(caller = %caller, "Hash accepted");
            return Ok(Some(PendingValidation {
                contract: ctx.caller,
                caller,
                hash,
                penalty,
            }));
        };

        let distribution = Self::apply_penalty(&mut state, caller, reporter, penalty);
        state.stats.penalties_applied += 1;
        state.events.push(VaultEvent::PenaltyApplied {
            hash,
            caller,
            penalty: distribution.amount,
            reported_by: reporter,
        });
        warn!(
            caller = %caller,
            reporter = %reporter,
            slashed = %distribution.amount,
            "Reported hash presented, bond slashed"
        );
        Ok(None)
    }

    /// Records a validation returned by `begin_validation`.
    pub fn commit_validation(&self, pending: PendingValidation) {
        let mut state = self.state.write();
        state.stats.hashes_validated += 1;
        state.events.push(VaultEvent::ValidatedHash {
            hash: pending.hash,
            caller: pending.caller,
            penalty: pending.penalty,
        });
        debug!(caller = %pending.caller, contract = %pending.contract, "Hash validated");
    }

    fn apply_penalty(
        state: &mut VaultState,
        caller: Address,
        reporter: Address,
        penalty: U256,
    ) -> PenaltyDistribution {
        let governor = state.governance.governor();
        let amount = state.ledger.bonded(&caller).min(penalty);
        let (reporter_reward, governance_share) = split_penalty(amount);
        state.ledger.move_bond(caller, reporter, reporter_reward);
        state.ledger.move_bond(caller, governor, governance_share);

        let distribution = PenaltyDistribution {
            caller,
            reporter,
            governor,
            amount,
            reporter_reward,
            governance_share,
        };
        debug_assert!(check_penalty_conservation(&distribution));
        debug_assert!(check_ledger_invariant(&state.ledger));
        distribution
    }

    /// Reports `hash` as compromised. Anyone may call.
    ///
    /// Returns false and changes nothing if the hash already has a reporter.
    pub fn report_hash(&self, ctx: &CallContext, hash: Hash) -> bool {
        let mut state = self.state.write();
        Self::record_report(&mut state, ctx.caller, hash)
    }

    /// Reports `hash` and forwards the attached value to the block coinbase.
    ///
    /// Nothing is paid when the hash was already reported.
    #[instrument(skip(self, ctx), fields(reporter = %ctx.caller, value = %ctx.value))]
    pub fn report_hash_and_pay(
        &self,
        ctx: &CallContext,
        hash: Hash,
    ) -> Result<bool, StealthError> {
        let mut state = self.state.write();
        if state.reports.reported_by(&hash).is_some() {
            debug!("Hash already reported, no payment");
            return Ok(false);
        }

        self.bank.transfer(ctx.caller, ctx.block.coinbase, ctx.value)?;
        Ok(Self::record_report(&mut state, ctx.caller, hash))
    }

    fn record_report(state: &mut VaultState, reporter: Address, hash: Hash) -> bool {
        if !state.reports.report(hash, reporter) {
            debug!(reporter = %reporter, "Hash already reported");
            return false;
        }
        state.stats.hashes_reported += 1;
        state.events.push(VaultEvent::ReportedHash {
            hash,
            reported_by: reporter,
        });
        info!(reporter = %reporter, "Hash reported");
        true
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    /// Enables or disables the EOA gas heuristic. Governance-only.
    pub fn set_eoa_auth_call_protection(
        &self,
        ctx: &CallContext,
        enabled: bool,
    ) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.config.eoa_auth_call_protection = enabled;
        state
            .events
            .push(VaultEvent::EoaAuthCallProtectionSet { enabled });
        info!(enabled, "EOA auth call protection set");
        Ok(())
    }

    /// Sets the tolerance of the EOA gas heuristic. Governance-only.
    pub fn set_gas_buffer(&self, ctx: &CallContext, gas_buffer: u64) -> Result<(), StealthError> {
        let mut state = self.state.write();
        state.governance.ensure_governor(ctx.caller)?;
        state.config.gas_buffer = gas_buffer;
        state.events.push(VaultEvent::GasBufferSet { gas_buffer });
        info!(gas_buffer, "Gas buffer set");
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

    /// Vault account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current governor.
    pub fn governor(&self) -> Address {
        self.state.read().governance.governor()
    }

    /// Bond held for `caller`.
    pub fn bonded(&self, caller: Address) -> U256 {
        self.state.read().ledger.bonded(&caller)
    }

    /// Sum of all bonds.
    pub fn total_bonded(&self) -> U256 {
        self.state.read().ledger.total_bonded()
    }

    /// Every caller that bonded or enabled a contract.
    pub fn callers(&self) -> Vec<Address> {
        self.state.read().registry.callers()
    }

    /// Contracts enabled by `caller`.
    pub fn caller_contracts(&self, caller: Address) -> Vec<Address> {
        self.state.read().registry.caller_contracts(&caller)
    }

    /// Whether `contract` may present hashes for `caller`.
    pub fn is_stealth_contract_enabled(&self, caller: Address, contract: Address) -> bool {
        self.state.read().registry.is_enabled(&caller, &contract)
    }

    /// Reporter of `hash`, if any.
    pub fn hash_reported_by(&self, hash: Hash) -> Option<Address> {
        self.state.read().reports.reported_by(&hash)
    }

    /// Whether the EOA heuristic is active.
    pub fn eoa_auth_call_protection(&self) -> bool {
        self.state.read().config.eoa_auth_call_protection
    }

    /// Current heuristic tolerance.
    pub fn gas_buffer(&self) -> u64 {
        self.state.read().config.gas_buffer
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> VaultStats {
        self.state.read().stats.clone()
    }

    /// Events emitted so far.
    pub fn events(&self) -> Vec<VaultEvent> {
        self.state.read().events.clone()
    }

    /// Takes the event log, leaving it empty.
    pub fn drain_events(&self) -> Vec<VaultEvent> {
        std::mem::take(&mut self.state.write().events)
    }
}

#[async_trait]
impl<B: NativeTransfer> StealthVaultApi for StealthVault<B> {
    fn address(&self) -> Address {
        self.address
    }

    async fn begin_validation(
        &self,
        ctx: &CallContext,
        caller: Address,
        hash: Hash,
        penalty: U256,
    ) -> Result<Option<PendingValidation>, StealthError> {
        StealthVault::begin_validation(self, ctx, caller, hash, penalty)
    }

    async fn commit_validation(&self, pending: PendingValidation) {
        StealthVault::commit_validation(self, pending)
    }

    async fn hash_reported_by(&self, hash: Hash) -> Option<Address> {
        StealthVault::hash_reported_by(self, hash)
    }
}

/// Creates a vault over a fresh in-memory bank for tests and local runs.
pub fn create_test_vault(
    governor: Address,
) -> Result<(StealthVault<InMemoryBank>, Arc<InMemoryBank>), StealthError> {
    let bank = Arc::new(InMemoryBank::new());
    let vault = StealthVault::new(
        Address::repeat_byte(0x5a),
        governor,
        VaultConfig::default(),
        Arc::clone(&bank),
    )?;
    Ok((vault, bank))
}

// =============================================================================
// TESTS
// =============================================================================
