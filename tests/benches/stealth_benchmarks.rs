//! # Stealth Relay Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | vault/validate_hash | Hash check for an enabled, unreported hash |
//! | vault/slash | Hash check that applies a penalty |
//! | relayer/execute | Full relay: guards, escrow, vault, job invocation |

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use shared_types::{Address, BlockContext, Bytes, CallContext, Hash, JobError, U256};
use sr_02_stealth_relayer::prelude::Job;
use stealth_runtime::container::governance_call;
use stealth_runtime::{StealthConfig, StealthStack};

const GOVERNOR: Address = Address::new([0x60; 20]);
const KEEPER: Address = Address::new([0x01; 20]);
const JOB: Address = Address::new([0x10; 20]);

struct NoopJob;

#[async_trait]
impl Job for NoopJob {
    async fn invoke(&self, _ctx: &CallContext, payload: &Bytes) -> Result<Bytes, JobError> {
        Ok(payload.clone())
    }
}

fn tx(from: Address, to: Address, block: u64, value: U256) -> CallContext {
    let block = BlockContext::at(block);
    CallContext::new_transaction(from, to, value, block.gas_limit, block)
}

fn stack() -> StealthStack {
    let stack = StealthStack::new(StealthConfig {
        governor: GOVERNOR,
        ..StealthConfig::default()
    })
    .unwrap();
    stack.jobs.deploy(JOB, Arc::new(NoopJob));
    stack
        .relayer
        .add_job(&governance_call(GOVERNOR, stack.relayer.address()), JOB)
        .unwrap();

    let vault = stack.vault.address();
    stack.bank.credit(KEEPER, U256::from(u64::MAX));
    stack.vault.bond(&tx(KEEPER, vault, 0, U256::from(u64::MAX))).unwrap();
    stack
        .vault
        .enable_stealth_contract(&tx(KEEPER, vault, 0, U256::zero()), stack.relayer.address())
        .unwrap();
    stack
}

fn bench_vault(c: &mut Criterion) {
    let mut group = c.benchmark_group("vault");
    let stack = stack();
    let relayer_frame = tx(KEEPER, stack.relayer.address(), 1, U256::zero())
        .child_call(stack.vault.address(), U256::zero());
    let penalty = U256::from(1_000u64);

    group.bench_function("validate_hash", |b| {
        let hash = Hash::keccak256(b"secret");
        b.iter(|| {
            black_box(
                stack
                    .vault
                    .validate_hash(&relayer_frame, KEEPER, hash, penalty)
                    .unwrap(),
            )
        })
    });

    let reported = Hash::keccak256(b"reported");
    stack
        .vault
        .report_hash(&tx(GOVERNOR, stack.vault.address(), 0, U256::zero()), reported);
    group.bench_function("slash", |b| {
        b.iter(|| {
            black_box(
                stack
                    .vault
                    .validate_hash(&relayer_frame, KEEPER, reported, penalty)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

fn bench_relayer(c: &mut Criterion) {
    let mut group = c.benchmark_group("relayer");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let stack = stack();
    let payload = Bytes::from_slice(&[0u8; 68]);

    group.bench_function("execute", |b| {
        b.iter_batched(
            || tx(KEEPER, stack.relayer.address(), 7, U256::zero()),
            |ctx| {
                runtime.block_on(async {
                    black_box(
                        stack
                            .relayer
                            .execute(&ctx, JOB, payload.clone(), Hash::keccak256(b"job"), 7)
                            .await
                            .unwrap(),
                    )
                })
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_vault, bench_relayer);
criterion_main!(benches);
