//! # SR-03 Stealth Guard - Multisig Transaction Approval Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! A multisig wallet hook that only lets executors run transactions. With
//! relayer verification on, executors must go through the stealth relayer,
//! so every execution is block-bound and backed by a stealth hash.
//!
//! ## Approval Table
//!
//! | Override | Verify relayer | Approved when | Otherwise |
//! |----------|----------------|---------------|-----------|
//! | on | any | always | - |
//! | off | off | sender is an executor | `NotExecutor` |
//! | off | on | sender is the relayer and its caller is an executor | `NotStealthRelayer` |
//!
//! Staking plays no part here; the guard only reads the relayer's caller.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{ExecutorSet, GuardConfig, Operation, SafeTransaction};
    pub use crate::domain::services::{authorize, RelayerSnapshot};
    pub use crate::events::GuardEvent;
    pub use crate::ports::inbound::TransactionGuard;
    pub use crate::ports::outbound::StealthRelayerView;
    pub use crate::service::StealthGuard;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Stealth Guard";
