//! # Component Container
//!
//! Configuration and the wired vault, relayer and guard.
//!
//! - Components are initialized in dependency order (vault, relayer, guard)
//! - Components talk to each other through their ports only

pub mod config;
pub mod stack;

pub use config::{ConfigError, StealthConfig};
pub use stack::{governance_call, ConcreteRelayer, ConcreteVault, StealthStack};
