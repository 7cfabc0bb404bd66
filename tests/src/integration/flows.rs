//! # Keeper Lifecycle Flows
//!
//! Bond, enable, execute, get front-run, get slashed: the full path a keeper
//! takes through the vault and relayer.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{Address, Bytes, CallContext, JobError, NativeTransfer, StealthError, U256};
use sr_01_stealth_vault::prelude::VaultEvent;
use sr_02_stealth_relayer::prelude::{Job, RelayOutcome, RelayerEvent};

use super::fixtures::*;

const REVERTING_JOB: Address = Address::new([0x11; 20]);

struct RevertingJob;

#[async_trait]
impl Job for RevertingJob {
    async fn invoke(&self, _ctx: &CallContext, _payload: &Bytes) -> Result<Bytes, JobError> {
        Err(JobError::Reverted("nope".to_string()))
    }
}

fn validated_hashes(h: &Harness) -> usize {
    h.stack
        .vault
        .events()
        .iter()
        .filter(|event| matches!(event, VaultEvent::ValidatedHash { .. }))
        .count()
}

#[tokio::test]
async fn test_front_run_hash_is_slashed() {
    let h = Harness::new();
    let hash = stealth_hash("keeper secret #1");
    let penalty = h.stack.relayer.penalty();

    h.bond(KEEPER, penalty);
    h.enable_relayer(KEEPER);

    // Block N+1: the job runs.
    let n = 100;
    let outcome = h.execute_mint(KEEPER, n + 1, n + 1, hash).await.unwrap();
    assert_eq!(outcome, RelayOutcome::Executed(Bytes::from_slice(b"minted")));
    assert_eq!(h.mint.balance_of(KEEPER), U256::from(MINT_AMOUNT));

    // Replaying the same block binding later fails.
    let err = h.execute_mint(KEEPER, n + 2, n + 1, hash).await.unwrap_err();
    assert_eq!(err.to_string(), "ST: wrong block");

    // A watcher saw the hash in the mempool.
    assert!(h.report(REPORTER, hash));

    // Block M+1: the call lands but nothing happens.
    let m = 200;
    let outcome = h.execute_mint(KEEPER, m + 1, m + 1, hash).await.unwrap();
    assert_eq!(outcome, RelayOutcome::Skipped);
    assert_eq!(h.mint.balance_of(KEEPER), U256::from(MINT_AMOUNT));

    let vault = &h.stack.vault;
    assert!(vault.bonded(KEEPER).is_zero());
    assert_eq!(vault.bonded(REPORTER), penalty / 10);
    assert_eq!(vault.bonded(GOVERNOR), penalty * 9 / 10);
    assert_eq!(vault.total_bonded(), penalty);
    assert!(vault.events().contains(&VaultEvent::PenaltyApplied {
        hash,
        caller: KEEPER,
        penalty,
        reported_by: REPORTER,
    }));

    let executed = h
        .stack
        .relayer
        .events()
        .into_iter()
        .filter(|event| matches!(event, RelayerEvent::StealthJobExecuted { .. }))
        .count();
    assert_eq!(executed, 1);
}

#[test]
fn test_report_is_write_once() {
    let h = Harness::new();
    let hash = stealth_hash("contested");

    assert!(h.report(REPORTER, hash));
    assert!(!h.report(OUTSIDER, hash));
    assert_eq!(h.stack.vault.hash_reported_by(hash), Some(REPORTER));

    // A late paid report pays nothing.
    h.stack.bank.credit(OUTSIDER, U256::from(5));
    let paid = tx(OUTSIDER, h.vault_address(), 10, U256::from(5));
    assert!(!h.stack.vault.report_hash_and_pay(&paid, hash).unwrap());
    assert_eq!(h.stack.bank.balance_of(OUTSIDER), U256::from(5));
    assert!(h.stack.bank.balance_of(COINBASE).is_zero());
    assert_eq!(h.stack.vault.hash_reported_by(hash), Some(REPORTER));
}

#[test]
fn test_reporting_does_not_make_a_caller() {
    let h = Harness::new();
    h.bond(KEEPER, unit());

    assert!(h.report(REPORTER, stealth_hash("watched")));

    assert_eq!(h.stack.vault.callers(), vec![KEEPER]);
}

#[test]
fn test_paid_report_bribes_coinbase() {
    let h = Harness::new();
    let hash = stealth_hash("bribed");
    h.stack.bank.credit(REPORTER, U256::from(40));

    let paid = tx(REPORTER, h.vault_address(), 10, U256::from(40));
    assert!(h.stack.vault.report_hash_and_pay(&paid, hash).unwrap());

    assert_eq!(h.stack.bank.balance_of(COINBASE), U256::from(40));
    assert_eq!(h.stack.vault.hash_reported_by(hash), Some(REPORTER));
}

#[tokio::test]
async fn test_eoa_protection_rejects_proxied_keeper() {
    let h = Harness::with_config(|config| config.vault.eoa_auth_call_protection = true);
    let hash = stealth_hash("direct only");
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);

    // Keeper -> proxy contract -> relayer -> vault.
    let proxy = Address::repeat_byte(0x77);
    let outer = tx(KEEPER, proxy, 5, U256::zero());
    let proxied = outer.child_call(h.relayer_address(), U256::zero());
    let err = h
        .stack
        .relayer
        .execute(&proxied, MINT_JOB, Bytes::default(), hash, 5)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "SV: eoa gas check failed");
    assert_eq!(h.stack.vault.stats().eoa_rejections, 1);

    // Keeper -> relayer -> vault.
    assert!(h.execute_mint(KEEPER, 5, 5, hash).await.unwrap().is_executed());
}

#[tokio::test]
async fn test_relayer_requires_vault_authorisation() {
    let h = Harness::new();
    h.bond(OUTSIDER, unit());

    let err = h
        .execute_mint(OUTSIDER, 5, 5, stealth_hash("never enabled"))
        .await
        .unwrap_err();

    assert!(matches!(err, StealthError::ContractNotEnabled { caller, .. } if caller == OUTSIDER));
    assert!(h.mint.balance_of(OUTSIDER).is_zero());
}

#[tokio::test]
async fn test_skipped_call_refunds_attached_value() {
    let h = Harness::new();
    let hash = stealth_hash("paid and reported");
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);
    assert!(h.report(REPORTER, hash));

    h.stack.bank.credit(KEEPER, U256::from(500));
    let ctx = tx(KEEPER, h.relayer_address(), 9, U256::from(500));
    let outcome = h
        .stack
        .relayer
        .execute_and_pay(&ctx, MINT_JOB, Bytes::default(), hash, 9, U256::from(100))
        .await
        .unwrap();

    assert_eq!(outcome, RelayOutcome::Skipped);
    assert_eq!(h.stack.bank.balance_of(KEEPER), U256::from(500));
    assert!(h.stack.bank.balance_of(COINBASE).is_zero());
    assert!(h.stack.bank.balance_of(h.relayer_address()).is_zero());
}

#[tokio::test]
async fn test_paid_execution_settles_value() {
    let h = Harness::new();
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);

    h.stack.bank.credit(KEEPER, U256::from(500));
    let ctx = tx(KEEPER, h.relayer_address(), 9, U256::from(500));
    h.stack
        .relayer
        .execute_without_block_protection_and_pay(
            &ctx,
            MINT_JOB,
            Bytes::default(),
            stealth_hash("paid"),
            U256::from(100),
        )
        .await
        .unwrap();

    assert_eq!(h.stack.bank.balance_of(COINBASE), U256::from(100));
    assert_eq!(h.stack.bank.balance_of(MINT_JOB), U256::from(400));
    assert!(h.stack.bank.balance_of(KEEPER).is_zero());
    assert_eq!(h.mint.balance_of(KEEPER), U256::from(MINT_AMOUNT));
}

#[tokio::test]
async fn test_slash_goes_to_current_governor() {
    let h = Harness::new();
    let successor = Address::repeat_byte(0x61);
    let hash = stealth_hash("after handover");
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);

    let vault_gov = tx(GOVERNOR, h.vault_address(), 0, U256::zero());
    h.stack
        .vault
        .set_pending_governor(&vault_gov, successor)
        .unwrap();
    let accept = tx(successor, h.vault_address(), 0, U256::zero());
    h.stack.vault.accept_governor(&accept).unwrap();

    assert!(h.report(REPORTER, hash));
    h.execute_mint(KEEPER, 3, 3, hash).await.unwrap();

    assert_eq!(h.stack.vault.bonded(successor), unit() * 9 / 10);
    assert!(h.stack.vault.bonded(GOVERNOR).is_zero());
}

#[tokio::test]
async fn test_reverted_job_leaves_vault_untouched() {
    let h = Harness::new();
    let hash = stealth_hash("reverting");
    h.stack.jobs.deploy(REVERTING_JOB, Arc::new(RevertingJob));
    h.stack
        .relayer
        .add_job(&h.governance(), REVERTING_JOB)
        .unwrap();
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);

    let err = h
        .stack
        .relayer
        .execute(&h.relayer_tx(KEEPER, 4), REVERTING_JOB, Bytes::default(), hash, 4)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "nope");
    assert_eq!(validated_hashes(&h), 0);
    assert_eq!(h.stack.vault.stats().hashes_validated, 0);
    assert_eq!(h.stack.vault.bonded(KEEPER), unit());

    // The same hash still validates once a job succeeds with it.
    assert!(h.execute_mint(KEEPER, 4, 4, hash).await.unwrap().is_executed());
    assert_eq!(validated_hashes(&h), 1);
    assert_eq!(h.stack.vault.stats().hashes_validated, 1);
}
