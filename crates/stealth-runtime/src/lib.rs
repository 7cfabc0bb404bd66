//! # Stealth Runtime
//!
//! Configuration loading and deployment wiring for the stealth relay.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging
//! 3. Validate configuration
//! 4. Initialize components in dependency order (vault, relayer, guard)
//! 5. Point the guard at the relayer

pub mod container;

pub use container::{ConfigError, StealthConfig, StealthStack};

use thiserror::Error;

/// Startup failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is not deployable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] stealth_telemetry::TelemetryError),

    /// A component rejected its configuration.
    #[error("component error: {0}")]
    Component(#[from] shared_types::StealthError),
}

/// Loads, validates and wires a stack from `config`.
pub fn bootstrap(config: StealthConfig) -> Result<StealthStack, RuntimeError> {
    config.validate()?;
    Ok(StealthStack::new(config)?)
}
