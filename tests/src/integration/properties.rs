//! # Randomised Properties
//!
//! Ledger accounting and block binding under generated inputs.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{Address, Bytes, Hash, StealthError, U256};
use sr_01_stealth_vault::prelude::VaultEvent;

use super::fixtures::*;

fn keepers(count: u8) -> Vec<Address> {
    (1..=count).map(|i| Address::repeat_byte(0x20 + i)).collect()
}

#[test]
fn test_bonds_sum_to_total() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let h = Harness::new();
    let keepers = keepers(6);
    let mut expected: HashMap<Address, U256> = HashMap::new();

    for _ in 0..200 {
        let keeper = keepers[rng.gen_range(0..keepers.len())];
        let amount = U256::from(rng.gen_range(1u64..=1_000_000));
        let final_bond = h.bond(keeper, amount);

        let entry = expected.entry(keeper).or_default();
        *entry += amount;
        assert_eq!(final_bond, *entry);
    }

    let mut sum = U256::zero();
    for keeper in &keepers {
        let bonded = expected.get(keeper).copied().unwrap_or_default();
        assert_eq!(h.stack.vault.bonded(*keeper), bonded);
        sum += bonded;
    }
    assert_eq!(h.stack.vault.total_bonded(), sum);
}

#[tokio::test]
async fn test_wrong_block_fails_for_any_job_and_hash() {
    let mut rng = StdRng::seed_from_u64(42);
    let h = Harness::new();
    let ghost = Address::repeat_byte(0x13);
    h.stack.relayer.add_job(&h.governance(), ghost).unwrap();
    h.bond(KEEPER, unit());
    h.enable_relayer(KEEPER);

    for _ in 0..100 {
        let current: u64 = rng.gen_range(1..u64::MAX);
        let target = loop {
            let candidate: u64 = rng.gen();
            if candidate != current {
                break candidate;
            }
        };
        let job = if rng.gen_bool(0.5) { MINT_JOB } else { ghost };
        let hash = Hash::from(rng.gen::<[u8; 32]>());

        let err = h
            .stack
            .relayer
            .execute(&h.relayer_tx(KEEPER, current), job, Bytes::default(), hash, target)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StealthError::WrongBlock {
                expected: target,
                actual: current,
            }
        );
    }

    assert!(h.mint.balance_of(KEEPER).is_zero());
    assert!(!h
        .stack
        .vault
        .events()
        .iter()
        .any(|event| matches!(event, VaultEvent::ValidatedHash { .. })));
}

#[tokio::test]
async fn test_slashing_conserves_total_bond() {
    let mut rng = StdRng::seed_from_u64(7);
    let h = Harness::new();
    let keepers = keepers(4);

    for keeper in &keepers {
        h.bond(*keeper, U256::from(rng.gen_range(1u64..=3)) * unit());
        h.enable_relayer(*keeper);
    }
    let total = h.stack.vault.total_bonded();

    for block in 1..=60u64 {
        let keeper = keepers[rng.gen_range(0..keepers.len())];
        let hash = Hash::from(rng.gen::<[u8; 32]>());
        if rng.gen_bool(0.5) {
            h.report(REPORTER, hash);
        }
        h.execute_mint(keeper, block, block, hash).await.unwrap();

        assert_eq!(h.stack.vault.total_bonded(), total);
    }

    let sum = keepers
        .iter()
        .chain([REPORTER, GOVERNOR].iter())
        .fold(U256::zero(), |acc, account| acc + h.stack.vault.bonded(*account));
    assert_eq!(sum, total);
}
