//! # Call Context
//!
//! The host execution frame every operation runs in. `CallContext.caller` is
//! the authenticated identity (`msg.sender`) that governance checks and
//! stealth validation are performed against.

use crate::gas;
use crate::value_objects::{Address, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// BLOCK CONTEXT
// =============================================================================

/// Block context for execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    /// Block number.
    pub number: u64,
    /// Block timestamp (unix seconds).
    pub timestamp: u64,
    /// Coinbase address (block proposer), receiver of inclusion payments.
    pub coinbase: Address,
    /// Block gas limit.
    pub gas_limit: u64,
}

impl BlockContext {
    /// Block gas limit used when none is given.
    pub const DEFAULT_GAS_LIMIT: u64 = 30_000_000;

    /// Creates a block context at `number` with default limits.
    #[must_use]
    pub fn at(number: u64) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }
}

impl Default for BlockContext {
    fn default() -> Self {
        Self {
            number: 0,
            timestamp: 0,
            coinbase: Address::ZERO,
            gas_limit: Self::DEFAULT_GAS_LIMIT,
        }
    }
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Execution frame for a single call.
///
/// Contains:
/// - Origin/caller information
/// - Attached native value
/// - Remaining gas budget
/// - Block context
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// Transaction sender (EOA that initiated the transaction).
    pub origin: Address,
    /// Immediate caller of this frame.
    pub caller: Address,
    /// Account whose code runs in this frame.
    pub address: Address,
    /// Native value attached to this call.
    pub value: U256,
    /// Gas still available in this frame.
    pub gas_left: u64,
    /// Block context.
    pub block: BlockContext,
    /// Call depth (0 for the outermost frame).
    pub depth: u16,
}

impl CallContext {
    /// Creates the outermost frame of a transaction submitted by `origin`.
    ///
    /// The intrinsic transaction cost is charged up front.
    #[must_use]
    pub fn new_transaction(
        origin: Address,
        to: Address,
        value: U256,
        gas_limit: u64,
        block: BlockContext,
    ) -> Self {
        Self {
            origin,
            caller: origin,
            address: to,
            value,
            gas_left: gas_limit.saturating_sub(gas::costs::TX_BASE),
            block,
            depth: 0,
        }
    }

    /// Creates a child frame for a CALL from this frame into `address`.
    ///
    /// The callee sees this frame's account as its caller and receives
    /// all-but-one-64th of the remaining gas.
    #[must_use]
    pub fn child_call(&self, address: Address, value: U256) -> Self {
        let has_value = !value.is_zero();
        Self {
            origin: self.origin,
            caller: self.address,
            address,
            value,
            gas_left: gas::forward_all(self.gas_left, has_value),
            block: self.block.clone(),
            depth: self.depth.saturating_add(1),
        }
    }

    /// Consumes gas from this frame.
    pub fn consume_gas(&mut self, amount: u64) {
        self.gas_left = self.gas_left.saturating_sub(amount);
    }

    /// Returns true if this frame is the outermost call of an EOA transaction.
    #[must_use]
    pub fn is_direct_call(&self) -> bool {
        self.depth == 0 && self.caller == self.origin
    }
}

// =============================================================================
// TESTS
// =============================================================================
