//! # Domain Invariants
//!
//! Conservation rules for the bond ledger.
//!
//! - LEDGER-SUM: sum of per-caller bonds equals `total_bonded`
//! - PENALTY-CONSERVATION: reporter reward + governance share equals the
//!   slashed amount

use crate::domain::entities::{BondLedger, PenaltyDistribution};
use shared_types::U256;

/// The ledger total matches the per-account bonds.
#[must_use]
pub fn check_ledger_invariant(ledger: &BondLedger) -> bool {
    let sum = ledger
        .entries()
        .fold(U256::zero(), |acc, (_, bond)| acc.saturating_add(*bond));
    sum == ledger.total_bonded()
}

/// A penalty redistributes exactly what was slashed.
#[must_use]
pub fn check_penalty_conservation(distribution: &PenaltyDistribution) -> bool {
    distribution
        .reporter_reward
        .checked_add(distribution.governance_share)
        .is_some_and(|sum| sum == distribution.amount)
}

/// Vault constants.
pub mod limits {
    /// Reporter receives `1 / REPORTER_REWARD_DIVISOR` of a penalty.
    pub const REPORTER_REWARD_DIVISOR: u64 = 10;

    /// Default gas tolerance of the EOA heuristic.
    pub const DEFAULT_GAS_BUFFER: u64 = 69_420;
}
