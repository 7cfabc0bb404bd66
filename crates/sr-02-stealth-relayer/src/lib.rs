//! # SR-02 Stealth Relayer - Guarded Job Invocation Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Invokes whitelisted jobs for keepers only when the keeper's stealth hash
//! is still uncompromised and, on the protected entry points, only in the
//! exact block the keeper targeted. Front-runners copying a keeper's call
//! either land in the wrong block or present a hash someone has reported.
//!
//! ## Guards
//!
//! | Order | Guard | Failure |
//! |-------|-------|---------|
//! | 1 | Job whitelisted | `SR: invalid job` |
//! | 2 | Exact block (protected entry points) | `ST: wrong block` |
//! | 2' | Unprotected entry points allowed | `SR: block protection required` |
//! | 3 | Vault validates the hash | silent skip (`RelayOutcome::Skipped`) |
//! | 4 | Job call succeeds | job's reason, verbatim |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | `StealthRelayer` | `service.rs` | Whitelist, entry points, value settlement |
//! | `StealthTx` | `stealth_tx.rs` | Guards 2 and 3 for contracts that gate themselves |
//! | `InMemoryJobDirectory` | `adapters/job_directory.rs` | `JobResolver` for tests and local runs |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sr_02_stealth_relayer::prelude::*;
//!
//! match relayer.execute(&ctx, job, call_data, hash, ctx.block.number).await? {
//!     RelayOutcome::Executed(data) => { /* job ran */ }
//!     RelayOutcome::Skipped => { /* hash was reported, bond slashed */ }
//! }
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;
pub mod stealth_tx;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::entities::{
        JobRegistry, RelayOutcome, RelayerConfig, StealthCall, ONE_UNIT,
    };
    pub use crate::domain::services::{check_block, split_payment};

    // Ports
    pub use crate::ports::inbound::StealthRelayerView;
    pub use crate::ports::outbound::{Job, JobResolver};

    // Adapters
    pub use crate::adapters::InMemoryJobDirectory;

    // Events
    pub use crate::events::RelayerEvent;

    // Components
    pub use crate::service::{RelayerStats, StealthRelayer};
    pub use crate::stealth_tx::StealthTx;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Stealth Relayer";
