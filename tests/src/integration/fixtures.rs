//! # Test Fixtures
//!
//! A stack wired by `StealthStack`, a minting job and frame builders.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, BlockContext, Bytes, CallContext, Hash, JobError, U256};
use sr_02_stealth_relayer::prelude::{Job, RelayOutcome, ONE_UNIT};
use stealth_runtime::container::governance_call;
use stealth_runtime::{StealthConfig, StealthStack};

pub const GOVERNOR: Address = Address::new([0x60; 20]);
pub const KEEPER: Address = Address::new([0x01; 20]);
pub const REPORTER: Address = Address::new([0x0f; 20]);
pub const OUTSIDER: Address = Address::new([0x0e; 20]);
pub const COINBASE: Address = Address::new([0xcb; 20]);
pub const MINT_JOB: Address = Address::new([0x10; 20]);

/// Amount `MintJob` credits per run.
pub const MINT_AMOUNT: u64 = 1_000;

/// One unit of native value.
pub fn unit() -> U256 {
    U256::from(ONE_UNIT)
}

/// Credits `MINT_AMOUNT` to the transaction origin on every run.
#[derive(Default)]
pub struct MintJob {
    balances: Mutex<HashMap<Address, U256>>,
}

impl MintJob {
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances
            .lock()
            .get(&account)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl Job for MintJob {
    async fn invoke(&self, ctx: &CallContext, _payload: &Bytes) -> Result<Bytes, JobError> {
        let mut balances = self.balances.lock();
        let balance = balances.entry(ctx.origin).or_default();
        *balance += U256::from(MINT_AMOUNT);
        Ok(Bytes::from_slice(b"minted"))
    }
}

pub struct Harness {
    pub stack: StealthStack,
    pub mint: Arc<MintJob>,
}

impl Harness {
    /// Stack with default component settings.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Stack with settings adjusted by `configure`.
    pub fn with_config(configure: impl FnOnce(&mut StealthConfig)) -> Self {
        let mut config = StealthConfig {
            governor: GOVERNOR,
            ..StealthConfig::default()
        };
        configure(&mut config);
        let stack = StealthStack::new(config).unwrap();

        let mint = Arc::new(MintJob::default());
        stack.jobs.deploy(MINT_JOB, mint.clone());
        stack
            .relayer
            .add_job(&governance_for(&stack), MINT_JOB)
            .unwrap();

        Self { stack, mint }
    }

    pub fn vault_address(&self) -> Address {
        self.stack.vault.address()
    }

    pub fn relayer_address(&self) -> Address {
        self.stack.relayer.address()
    }

    /// Funds `who` and bonds `amount` in the vault.
    pub fn bond(&self, who: Address, amount: U256) -> U256 {
        self.stack.bank.credit(who, amount);
        let ctx = tx(who, self.vault_address(), 0, amount);
        self.stack.vault.bond(&ctx).unwrap()
    }

    /// `who` allows the relayer to present its hashes.
    pub fn enable_relayer(&self, who: Address) {
        let ctx = tx(who, self.vault_address(), 0, U256::zero());
        self.stack
            .vault
            .enable_stealth_contract(&ctx, self.relayer_address())
            .unwrap();
    }

    /// Reports `hash` as `who`.
    pub fn report(&self, who: Address, hash: Hash) -> bool {
        let ctx = tx(who, self.vault_address(), 0, U256::zero());
        self.stack.vault.report_hash(&ctx, hash)
    }

    /// Keeper transaction straight to the relayer, landing in `block`.
    pub fn relayer_tx(&self, from: Address, block: u64) -> CallContext {
        tx(from, self.relayer_address(), block, U256::zero())
    }

    /// Runs `MINT_JOB` for `from` in `block`, bound to `target`.
    pub async fn execute_mint(
        &self,
        from: Address,
        block: u64,
        target: u64,
        hash: Hash,
    ) -> Result<RelayOutcome, shared_types::StealthError> {
        self.stack
            .relayer
            .execute(&self.relayer_tx(from, block), MINT_JOB, Bytes::default(), hash, target)
            .await
    }

    pub fn governance(&self) -> CallContext {
        governance_for(&self.stack)
    }
}

fn governance_for(stack: &StealthStack) -> CallContext {
    governance_call(stack.config.governor, stack.relayer.address())
}

/// Top-level transaction from `from` to `to`, mined in `block`.
pub fn tx(from: Address, to: Address, block: u64, value: U256) -> CallContext {
    let mut block = BlockContext::at(block);
    block.coinbase = COINBASE;
    CallContext::new_transaction(from, to, value, block.gas_limit, block)
}

/// Stealth hash for `secret`.
pub fn stealth_hash(secret: &str) -> Hash {
    Hash::keccak256(secret.as_bytes())
}
