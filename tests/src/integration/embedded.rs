//! # Embedded StealthTx
//!
//! A contract gating its own entry point with `StealthTx` instead of being
//! called through the relayer. The vault sees the contract as the presenter
//! and the keeper as the bonded caller.

use std::sync::Arc;

use parking_lot::Mutex;
use shared_types::{Address, CallContext, Hash, StealthError, U256};
use sr_01_stealth_vault::prelude::StealthVaultApi;
use sr_02_stealth_relayer::prelude::StealthTx;

use super::fixtures::*;

const HARVESTER: Address = Address::new([0x4a; 20]);

/// Harvests only for keepers whose stealth hash is still secret.
struct GatedHarvester {
    stealth: StealthTx,
    harvests: Mutex<Vec<Address>>,
}

impl GatedHarvester {
    fn new(vault: Arc<dyn StealthVaultApi>) -> Self {
        Self {
            stealth: StealthTx::new(vault, unit()).unwrap(),
            harvests: Mutex::new(Vec::new()),
        }
    }

    async fn harvest(
        &self,
        ctx: &CallContext,
        hash: Hash,
        block_number: u64,
    ) -> Result<bool, StealthError> {
        if !self
            .stealth
            .validate_stealth_tx_and_block(ctx, hash, block_number)
            .await?
        {
            return Ok(false);
        }
        self.harvests.lock().push(ctx.caller);
        Ok(true)
    }
}

fn harvester(h: &Harness) -> GatedHarvester {
    GatedHarvester::new(h.stack.vault.clone())
}

fn enable_harvester(h: &Harness, who: Address) {
    let ctx = tx(who, h.vault_address(), 0, U256::zero());
    h.stack.vault.enable_stealth_contract(&ctx, HARVESTER).unwrap();
}

#[tokio::test]
async fn test_harvest_requires_enabled_contract() {
    let h = Harness::new();
    let harvester = harvester(&h);
    h.bond(KEEPER, unit());
    // Enabling the relayer does not cover other contracts.
    h.enable_relayer(KEEPER);

    let err = harvester
        .harvest(&tx(KEEPER, HARVESTER, 4, U256::zero()), stealth_hash("h"), 4)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StealthError::ContractNotEnabled {
            caller: KEEPER,
            contract: HARVESTER,
        }
    );
}

#[tokio::test]
async fn test_harvest_runs_for_secret_hash() {
    let h = Harness::new();
    let harvester = harvester(&h);
    h.bond(KEEPER, unit());
    enable_harvester(&h, KEEPER);

    let harvested = harvester
        .harvest(&tx(KEEPER, HARVESTER, 4, U256::zero()), stealth_hash("h"), 4)
        .await
        .unwrap();

    assert!(harvested);
    assert_eq!(harvester.harvests.lock().as_slice(), &[KEEPER]);
    assert_eq!(h.stack.vault.bonded(KEEPER), unit());
}

#[tokio::test]
async fn test_harvest_skips_reported_hash_and_slashes() {
    let h = Harness::new();
    let harvester = harvester(&h);
    let hash = stealth_hash("leaked");
    h.bond(KEEPER, unit());
    enable_harvester(&h, KEEPER);
    assert!(h.report(REPORTER, hash));

    let harvested = harvester
        .harvest(&tx(KEEPER, HARVESTER, 4, U256::zero()), hash, 4)
        .await
        .unwrap();

    assert!(!harvested);
    assert!(harvester.harvests.lock().is_empty());
    assert!(h.stack.vault.bonded(KEEPER).is_zero());
    assert_eq!(h.stack.vault.bonded(REPORTER), unit() / 10);
}

#[tokio::test]
async fn test_harvest_bound_to_block() {
    let h = Harness::new();
    let harvester = harvester(&h);
    h.bond(KEEPER, unit());
    enable_harvester(&h, KEEPER);

    let err = harvester
        .harvest(&tx(KEEPER, HARVESTER, 5, U256::zero()), stealth_hash("h"), 4)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "ST: wrong block");
    assert!(h.stack.vault.events().iter().all(|event| !matches!(
        event,
        sr_01_stealth_vault::prelude::VaultEvent::ValidatedHash { .. }
    )));
}
