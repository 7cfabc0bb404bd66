//! # Stealth Stack
//!
//! Holds the component instances and wires them together.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Native bank, job directory (no dependencies)
//! Level 1: Vault (bank)
//! Level 2: Relayer (vault, job directory, bank)
//! Level 3: Guard (relayer view)
//! ```

use std::sync::Arc;

use shared_types::{Address, BlockContext, CallContext, InMemoryBank, StealthError, U256};
use sr_01_stealth_vault::prelude::StealthVault;
use sr_02_stealth_relayer::prelude::{InMemoryJobDirectory, StealthRelayer};
use sr_03_stealth_guard::prelude::StealthGuard;
use tracing::{info, instrument};

use crate::container::config::StealthConfig;

/// Vault over the in-memory bank.
pub type ConcreteVault = StealthVault<InMemoryBank>;

/// Relayer over the in-memory job directory and bank.
pub type ConcreteRelayer = StealthRelayer<InMemoryJobDirectory, InMemoryBank>;

/// All components of one deployment.
pub struct StealthStack {
    /// Native balances.
    pub bank: Arc<InMemoryBank>,
    /// Deployed jobs.
    pub jobs: Arc<InMemoryJobDirectory>,
    /// Stealth vault.
    pub vault: Arc<ConcreteVault>,
    /// Stealth relayer.
    pub relayer: Arc<ConcreteRelayer>,
    /// Multisig guard.
    pub guard: Arc<StealthGuard>,
    /// Configuration (immutable after initialization).
    pub config: StealthConfig,
}

impl StealthStack {
    /// Builds and wires every component.
    ///
    /// The guard is pointed at the relayer as part of construction.
    #[instrument(name = "stack_init", skip(config))]
    pub fn new(config: StealthConfig) -> Result<Self, StealthError> {
        info!("Phase 1: Creating shared infrastructure");
        let bank = Arc::new(InMemoryBank::new());
        let jobs = Arc::new(InMemoryJobDirectory::new());

        info!("Phase 2: Initializing vault");
        let vault = Arc::new(StealthVault::new(
            config.vault_address,
            config.governor,
            config.vault.clone(),
            Arc::clone(&bank),
        )?);

        info!("Phase 3: Initializing relayer");
        let relayer = Arc::new(StealthRelayer::new(
            config.relayer_address,
            config.governor,
            vault.clone(),
            config.relayer.clone(),
            Arc::clone(&jobs),
            Arc::clone(&bank),
        )?);

        info!("Phase 4: Initializing guard");
        let guard = Arc::new(StealthGuard::new(config.governor, config.guard.clone())?);
        let governance = governance_call(config.governor, Address::ZERO);
        guard.set_stealth_relayer(&governance, relayer.clone())?;

        info!(
            vault = %vault.address(),
            relayer = %relayer.address(),
            governor = %config.governor,
            "Stealth stack ready"
        );
        Ok(Self {
            bank,
            jobs,
            vault,
            relayer,
            guard,
            config,
        })
    }
}

/// Frame for a governance transaction sent to `target`.
pub fn governance_call(governor: Address, target: Address) -> CallContext {
    let block = BlockContext::default();
    CallContext::new_transaction(governor, target, U256::zero(), block.gas_limit, block)
}
