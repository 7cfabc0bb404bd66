//! # Domain Services
//!
//! Pure functions: penalty split and the anti-proxy gas heuristic.

use crate::domain::invariants::limits;
use shared_types::{gas, StealthError, U256};

// =============================================================================
// PENALTY SPLIT
// =============================================================================

/// Splits a slashed amount into `(reporter_reward, governance_share)`.
///
/// The reporter gets 1/10 rounded down; governance gets the remainder.
#[must_use]
pub fn split_penalty(amount: U256) -> (U256, U256) {
    let reporter_reward = amount / U256::from(limits::REPORTER_REWARD_DIVISOR);
    (reporter_reward, amount - reporter_reward)
}

// =============================================================================
// EOA GAS HEURISTIC
// =============================================================================

/// Minimum gas a validation call can observe if the keeper's transaction
/// reached the vault through exactly one contract hop.
///
/// A keeper submits with the full block gas limit; one call boundary keeps
/// 63/64 of it. `gas_buffer` absorbs what the relayer and the vault spend
/// before the check.
#[must_use]
pub fn eoa_gas_threshold(block_gas_limit: u64, gas_buffer: u64) -> u64 {
    let direct = block_gas_limit - block_gas_limit / gas::CALL_GAS_DIVISOR;
    direct.saturating_sub(gas_buffer)
}

/// Fails with `EoaCheckFailed` when the observed budget is too small for a
/// direct call.
pub fn check_eoa_gas(
    gas_left: u64,
    block_gas_limit: u64,
    gas_buffer: u64,
) -> Result<(), StealthError> {
    let required = eoa_gas_threshold(block_gas_limit, gas_buffer);
    if gas_left < required {
        return Err(StealthError::EoaCheckFailed { gas_left, required });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
