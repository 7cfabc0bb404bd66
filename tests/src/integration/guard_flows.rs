//! # Guard Flows
//!
//! A multisig whose guard only trusts executors reaching it through the
//! relayer. The safe is modelled as a job: the relayer invokes it and it asks
//! the guard before doing anything.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, Bytes, CallContext, JobError, StealthError, U256};
use sr_02_stealth_relayer::prelude::Job;
use sr_03_stealth_guard::prelude::{SafeTransaction, StealthGuard, TransactionGuard};

use super::fixtures::*;

const SAFE: Address = Address::new([0x5f; 20]);

/// Multisig that runs a transaction once its guard approves `msg.sender`.
struct GuardedSafe {
    guard: Arc<StealthGuard>,
    executed: Mutex<Vec<Address>>,
}

#[async_trait]
impl Job for GuardedSafe {
    async fn invoke(&self, ctx: &CallContext, _payload: &Bytes) -> Result<Bytes, JobError> {
        let tx = SafeTransaction {
            to: Address::repeat_byte(0x99),
            ..SafeTransaction::default()
        };
        TransactionGuard::check_transaction(self.guard.as_ref(), &tx, ctx.caller)
            .map_err(|err| JobError::Reverted(err.to_string()))?;
        self.executed.lock().push(ctx.origin);
        Ok(Bytes::default())
    }
}

fn guarded_harness() -> (Harness, Arc<GuardedSafe>) {
    let h = Harness::with_config(|config| config.guard.verify_stealth_relayer = true);
    let governance = h.governance();
    h.stack.guard.add_executor(&governance, KEEPER).unwrap();

    let safe = Arc::new(GuardedSafe {
        guard: h.stack.guard.clone(),
        executed: Mutex::new(Vec::new()),
    });
    h.stack.jobs.deploy(SAFE, safe.clone());
    h.stack.relayer.add_job(&governance, SAFE).unwrap();

    for who in [KEEPER, OUTSIDER] {
        h.bond(who, unit());
        h.enable_relayer(who);
    }
    (h, safe)
}

#[tokio::test]
async fn test_executor_through_relayer_approved() {
    let (h, safe) = guarded_harness();

    let outcome = h
        .stack
        .relayer
        .execute(&h.relayer_tx(KEEPER, 8), SAFE, Bytes::default(), stealth_hash("safe tx"), 8)
        .await
        .unwrap();

    assert!(outcome.is_executed());
    assert_eq!(safe.executed.lock().as_slice(), &[KEEPER]);
}

#[tokio::test]
async fn test_non_executor_through_relayer_rejected() {
    let (h, safe) = guarded_harness();

    let err = h
        .stack
        .relayer
        .execute(&h.relayer_tx(OUTSIDER, 8), SAFE, Bytes::default(), stealth_hash("safe tx"), 8)
        .await
        .unwrap_err();

    assert_eq!(err, StealthError::JobReverted("NotStealthRelayer".to_string()));
    assert!(safe.executed.lock().is_empty());
}

#[tokio::test]
async fn test_relayer_caller_gone_after_execution() {
    let (h, _safe) = guarded_harness();
    h.stack
        .relayer
        .execute(&h.relayer_tx(KEEPER, 8), SAFE, Bytes::default(), stealth_hash("safe tx"), 8)
        .await
        .unwrap();

    // The relayer no longer vouches for anyone once the job returned.
    let tx = SafeTransaction::default();
    assert_eq!(
        h.stack.guard.check_transaction(&tx, h.relayer_address()),
        Err(StealthError::NotStealthRelayer)
    );
}

#[test]
fn test_executor_bypassing_relayer_rejected() {
    let (h, _safe) = guarded_harness();
    let tx = SafeTransaction::default();

    assert_eq!(
        h.stack.guard.check_transaction(&tx, KEEPER),
        Err(StealthError::NotStealthRelayer)
    );
}

#[test]
fn test_guard_modes() {
    let h = Harness::new();
    let governance = h.governance();
    let guard = &h.stack.guard;
    let tx = SafeTransaction {
        value: U256::from(1),
        ..SafeTransaction::default()
    };
    guard.add_executor(&governance, KEEPER).unwrap();

    assert_eq!(guard.check_transaction(&tx, KEEPER), Ok(()));
    assert_eq!(
        guard.check_transaction(&tx, OUTSIDER),
        Err(StealthError::NotExecutor)
    );

    guard.set_override_guard_checks(&governance, true).unwrap();
    assert_eq!(guard.check_transaction(&tx, OUTSIDER), Ok(()));
    assert_eq!(
        guard.check_after_execution(shared_types::Hash::keccak256(b"done"), true),
        Ok(())
    );
}
