//! # Domain Services
//!
//! Pure guard logic shared by the relayer and embedded `StealthTx` users.

use shared_types::{StealthError, U256};

/// Block-binding guard: the call must land in exactly `target`.
pub fn check_block(target: u64, current: u64) -> Result<(), StealthError> {
    if target != current {
        return Err(StealthError::WrongBlock {
            expected: target,
            actual: current,
        });
    }
    Ok(())
}

/// Splits the attached value into `(job_value, coinbase_payment)`.
pub fn split_payment(value: U256, payment: U256) -> Result<(U256, U256), StealthError> {
    if payment > value {
        return Err(StealthError::InsufficientValue {
            required: payment,
            provided: value,
        });
    }
    Ok((value - payment, payment))
}
