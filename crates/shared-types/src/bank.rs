//! # Native Value Transfer
//!
//! Port for the host's native-currency transfer capability plus an in-memory
//! adapter used by tests and the local container.

use crate::errors::TransferError;
use crate::value_objects::{Address, U256};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Host capability: move native value between accounts.
pub trait NativeTransfer: Send + Sync {
    /// Transfers `amount` from `from` to `to`. Atomic: either both sides
    /// change or neither does.
    fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<(), TransferError>;

    /// Native balance of `account`.
    fn balance_of(&self, account: Address) -> U256;
}

/// In-memory native balances.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    balances: RwLock<HashMap<Address, U256>>,
}

impl InMemoryBank {
    /// Creates an empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `amount` to `account` (test funding).
    pub fn credit(&self, account: Address, amount: U256) {
        let mut balances = self.balances.write();
        let balance = balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }
}

impl NativeTransfer for InMemoryBank {
    fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<(), TransferError> {
        if amount.is_zero() || from == to {
            return Ok(());
        }

        let mut balances = self.balances.write();
        let available = balances.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let recipient = balances.get(&to).copied().unwrap_or_default();
        let credited = recipient
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        balances.insert(from, available - amount);
        balances.insert(to, credited);
        debug!(from = %from, to = %to, amount = %amount, "Native transfer");
        Ok(())
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.balances
            .read()
            .get(&account)
            .copied()
            .unwrap_or_default()
    }
}
