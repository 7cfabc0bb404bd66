//! # Stealth Telemetry
//!
//! Structured logging for the stealth relay services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stealth_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_subsystem(2, "stealth-relayer");
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SR_SERVICE_NAME` | `stealth-relay` | Service name in logs |
//! | `SR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SR_JSON_LOGS` | `false` (`true` in containers) | JSON output |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),

    /// The configuration could not be turned into a filter.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
