//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the stealth vault.
//! NO I/O, NO async, NO locking.
//!
//! - `entities`: bond ledger, hash-report book, vault configuration
//! - `services`: penalty split and the EOA gas heuristic
//! - `invariants`: ledger conservation checks

pub mod entities;
pub mod invariants;
pub mod services;

pub use entities::*;
pub use invariants::*;
pub use services::*;
