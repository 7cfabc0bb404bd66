//! # SR-01 Stealth Vault - Bond Ledger & Hash Oracle Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Holds native-currency bonds for keepers and answers one question for the
//! contracts they enable: "is this stealth hash still uncompromised?". A
//! reported hash costs the keeper up to `penalty` of its bond, paid out to
//! the reporter (1/10) and governance (the rest).
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | LEDGER-SUM | Sum of bonds equals `total_bonded` | `domain/invariants.rs` - `check_ledger_invariant()` |
//! | PENALTY-CONSERVATION | Reporter reward + governance share equals slashed amount | `domain/invariants.rs` - `check_penalty_conservation()` |
//! | REPORT-ONCE | A hash keeps its first reporter | `domain/entities.rs` - `HashReportBook::report()` |
//!
//! ## Failure Classes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(true)` | Hash not reported |
//! | `Ok(false)` | Hash reported, bond slashed (soft failure) |
//! | `Err(EoaCheckFailed)` | Call did not arrive through a single hop |
//! | `Err(ContractNotEnabled)` | Presenting contract not enabled by the caller |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sr_01_stealth_vault::prelude::*;
//!
//! vault.bond(&ctx)?;
//! vault.enable_stealth_contract(&ctx, relayer_address)?;
//!
//! // From inside the relayer frame:
//! if vault.validate_hash(&vault_frame, keeper, hash, penalty)? {
//!     // run the job
//! }
//! ```

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
    // Domain entities
    pub use crate::domain::entities::{
        BondLedger, CallerRegistry, HashReportBook, PenaltyDistribution, PendingValidation,
        VaultConfig,
    };

    // Domain services
    pub use crate::domain::services::{check_eoa_gas, eoa_gas_threshold, split_penalty};

    // Invariants
    pub use crate::domain::invariants::{
        check_ledger_invariant, check_penalty_conservation, limits,
    };

    // Ports
    pub use crate::ports::inbound::StealthVaultApi;

    // Events
    pub use crate::events::VaultEvent;

    // Service
    pub use crate::service::{create_test_vault, StealthVault, VaultStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Stealth Vault";

// =============================================================================
// TESTS
// =============================================================================
