//! # Stealth Relay Test Suite
//!
//! Cross-component flows exercising the vault, relayer and guard together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs      # Wired stack, jobs, frame builders
//!     ├── flows.rs         # Keeper lifecycle: bond, execute, report, slash
//!     ├── properties.rs    # Randomised ledger and block-binding checks
//!     ├── guard_flows.rs   # Multisig guard behind the relayer
//!     └── embedded.rs      # StealthTx inside a self-gated contract
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sr-tests
//!
//! # By category
//! cargo test -p sr-tests integration::flows::
//!
//! # Benchmarks
//! cargo bench -p sr-tests
//! ```

#![allow(dead_code)]
