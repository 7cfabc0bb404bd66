//! # Driven Ports (SPI - Outbound)
//!
//! Jobs are opaque capabilities: the relayer hands them a call frame and a
//! payload and knows nothing about what they do.

use async_trait::async_trait;
use shared_types::{Address, Bytes, CallContext, JobError};
use std::sync::Arc;

/// A whitelisted target contract.
#[async_trait]
pub trait Job: Send + Sync {
    /// Runs the call encoded in `payload`.
    ///
    /// `ctx.caller` is the relayer, `ctx.origin` the keeper and `ctx.value`
    /// what the relayer forwarded.
    async fn invoke(&self, ctx: &CallContext, payload: &Bytes) -> Result<Bytes, JobError>;
}

/// Looks up the code behind a job address.
pub trait JobResolver: Send + Sync {
    /// Returns the job deployed at `address`, if any.
    fn resolve(&self, address: &Address) -> Option<Arc<dyn Job>>;
}
