//! # Stealth Runtime
//!
//! Loads the configuration, initializes logging and deploys the stack.

use anyhow::{Context, Result};
use stealth_runtime::{bootstrap, StealthConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = StealthConfig::from_env().context("loading configuration")?;
    stealth_telemetry::init_logging(&config.telemetry).context("initializing logging")?;

    info!("===========================================");
    info!("  Stealth Relay Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let stack = bootstrap(config).context("deploying stealth stack")?;
    info!(
        vault = %stack.vault.address(),
        relayer = %stack.relayer.address(),
        penalty = %stack.relayer.penalty(),
        eoa_protection = stack.vault.eoa_auth_call_protection(),
        force_block_protection = stack.relayer.force_block_protection(),
        "Stack deployed. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("Shutdown complete");
    Ok(())
}
