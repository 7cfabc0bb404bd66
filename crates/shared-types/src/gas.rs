//! # Gas Forwarding Rules
//!
//! Resource accounting at call boundaries. Every nested call may receive at
//! most 63/64 of the budget left after the fixed call overhead (EIP-150).
//! The vault's anti-proxy heuristic is built on this discount.

// =============================================================================
// BASE GAS COSTS
// =============================================================================

/// Gas costs charged at transaction and call boundaries.
pub mod costs {
    /// Base transaction gas (intrinsic cost).
    pub const TX_BASE: u64 = 21_000;
    /// Cold account access paid by every outgoing call.
    pub const COLD_ACCOUNT_ACCESS: u64 = 2600;
    /// Extra cost for a call carrying value.
    pub const CALL_VALUE: u64 = 9000;
    /// Stipend given to the callee when value > 0.
    pub const CALL_STIPEND: u64 = 2300;
}

/// Divisor of the all-but-one-64th forwarding rule.
pub const CALL_GAS_DIVISOR: u64 = 64;

// =============================================================================
// GAS CALCULATOR
// =============================================================================

/// Fixed overhead of one call boundary.
#[must_use]
pub fn call_overhead(has_value: bool) -> u64 {
    if has_value {
        costs::COLD_ACCOUNT_ACCESS + costs::CALL_VALUE
    } else {
        costs::COLD_ACCOUNT_ACCESS
    }
}

/// Calculate gas to pass to a subcall (63/64 rule per EIP-150).
#[must_use]
pub fn calculate_call_gas(available_gas: u64, requested_gas: u64, has_value: bool) -> u64 {
    let max_gas = available_gas - (available_gas / CALL_GAS_DIVISOR);
    let mut gas = requested_gas.min(max_gas);

    if has_value {
        gas = gas.saturating_add(costs::CALL_STIPEND);
    }

    gas
}

/// Budget a callee receives when the caller forwards everything it has.
#[must_use]
pub fn forward_all(gas_left: u64, has_value: bool) -> u64 {
    let available = gas_left.saturating_sub(call_overhead(has_value));
    calculate_call_gas(available, u64::MAX, has_value)
}

// =============================================================================
// TESTS
// =============================================================================
