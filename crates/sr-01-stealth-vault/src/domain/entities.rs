//! # Core Domain Entities
//!
//! Bond ledger, caller registry, stealth authorizations and the hash-report
//! book. All are plain data; the service wraps them in a lock.

use crate::domain::invariants::limits;
use serde::{Deserialize, Serialize};
use shared_types::{Address, AddressSet, Hash, U256};
use std::collections::HashMap;

// =============================================================================
// VAULT CONFIGURATION
// =============================================================================

/// Tunable parameters of the anti-proxy heuristic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Whether `validate_hash` runs the EOA gas check.
    pub eoa_auth_call_protection: bool,
    /// Gas tolerated below the direct-call expectation.
    pub gas_buffer: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            eoa_auth_call_protection: false,
            gas_buffer: limits::DEFAULT_GAS_BUFFER,
        }
    }
}

// =============================================================================
// BOND LEDGER
// =============================================================================

/// Per-caller native-currency stake.
///
/// ## Invariants
/// - `total_bonded == sum(bonded.values())`
/// - balances never go negative (`debit` caps at the available bond)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BondLedger {
    bonded: HashMap<Address, U256>,
    total_bonded: U256,
}

impl BondLedger {
    /// Bond held for `account`.
    #[must_use]
    pub fn bonded(&self, account: &Address) -> U256 {
        self.bonded.get(account).copied().unwrap_or_default()
    }

    /// Sum of all bonds.
    #[must_use]
    pub fn total_bonded(&self) -> U256 {
        self.total_bonded
    }

    /// Adds `amount` to `account` and the total. Returns the new bond.
    pub fn credit(&mut self, account: Address, amount: U256) -> U256 {
        let bond = self.bonded.entry(account).or_default();
        *bond = bond.saturating_add(amount);
        self.total_bonded = self.total_bonded.saturating_add(amount);
        *bond
    }

    /// Removes up to `amount` from `account`. Returns what was actually removed.
    pub fn debit(&mut self, account: Address, amount: U256) -> U256 {
        let bond = self.bonded.entry(account).or_default();
        let taken = amount.min(*bond);
        *bond -= taken;
        self.total_bonded -= taken;
        taken
    }

    /// Moves up to `amount` from one bond to another without touching the
    /// total. Returns what was moved.
    pub fn move_bond(&mut self, from: Address, to: Address, amount: U256) -> U256 {
        let moved = self.debit(from, amount);
        self.credit(to, moved);
        moved
    }

    /// Iterates every `(account, bond)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.bonded.iter()
    }
}

// =============================================================================
// HASH REPORT BOOK
// =============================================================================

/// Write-once relation hash -> reporter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashReportBook {
    reports: HashMap<Hash, Address>,
}

impl HashReportBook {
    /// Records `reporter` for `hash`. Returns false (and changes nothing) if
    /// the hash was already reported.
    pub fn report(&mut self, hash: Hash, reporter: Address) -> bool {
        if self.reports.contains_key(&hash) {
            return false;
        }
        self.reports.insert(hash, reporter);
        true
    }

    /// Who reported `hash`, if anyone.
    #[must_use]
    pub fn reported_by(&self, hash: &Hash) -> Option<Address> {
        self.reports.get(hash).copied()
    }
}

// =============================================================================
// STEALTH AUTHORIZATIONS
// =============================================================================

/// Callers that ever bonded or enabled a contract, and the contracts each
/// caller lets present hashes on its behalf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallerRegistry {
    callers: AddressSet,
    stealth_contracts: HashMap<Address, AddressSet>,
}

impl CallerRegistry {
    /// Registers `caller` (append-only, deduplicated).
    pub fn register(&mut self, caller: Address) {
        self.callers.insert(caller);
    }

    /// Authorizes `contract` for `caller`. Returns false if already enabled.
    pub fn enable(&mut self, caller: Address, contract: Address) -> bool {
        self.register(caller);
        self.stealth_contracts
            .entry(caller)
            .or_default()
            .insert(contract)
    }

    /// Whether `contract` may present hashes for `caller`.
    #[must_use]
    pub fn is_enabled(&self, caller: &Address, contract: &Address) -> bool {
        self.stealth_contracts
            .get(caller)
            .is_some_and(|set| set.contains(contract))
    }

    /// Callers in registration order.
    #[must_use]
    pub fn callers(&self) -> Vec<Address> {
        self.callers.to_vec()
    }

    /// Contracts enabled by `caller`, in enable order.
    #[must_use]
    pub fn caller_contracts(&self, caller: &Address) -> Vec<Address> {
        self.stealth_contracts
            .get(caller)
            .map(AddressSet::to_vec)
            .unwrap_or_default()
    }
}

// =============================================================================
// PENALTY
// =============================================================================

/// Outcome of slashing one caller for a reported hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyDistribution {
    /// Slashed caller.
    pub caller: Address,
    /// Reporter of the hash.
    pub reporter: Address,
    /// Governance at the time of slashing.
    pub governor: Address,
    /// Amount taken from the caller's bond.
    pub amount: U256,
    /// Part credited to the reporter.
    pub reporter_reward: U256,
    /// Part credited to governance.
    pub governance_share: U256,
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A hash that passed every check but is not yet recorded as validated.
///
/// The presenting contract commits it once its own call succeeded. Dropping
/// it leaves the vault as if the hash had never been presented.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingValidation {
    /// Contract that presented the hash.
    pub contract: Address,
    /// Bonded caller the hash was presented for.
    pub caller: Address,
    /// The validated hash.
    pub hash: Hash,
    /// Penalty the contract would have applied.
    pub penalty: U256,
}

// =============================================================================
// TESTS
// =============================================================================
