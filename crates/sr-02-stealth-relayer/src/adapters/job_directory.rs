//! Job Directory Adapter
//!
//! Implements `JobResolver` over an in-memory address -> job map.

use crate::ports::outbound::{Job, JobResolver};
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory job deployments for tests and local runs.
#[derive(Default)]
pub struct InMemoryJobDirectory {
    jobs: RwLock<HashMap<Address, Arc<dyn Job>>>,
}

impl InMemoryJobDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys `job` at `address`, replacing whatever was there.
    pub fn deploy(&self, address: Address, job: Arc<dyn Job>) {
        debug!(job = %address, "Job deployed");
        self.jobs.write().insert(address, job);
    }

    /// Removes the code at `address`. Returns true if something was removed.
    pub fn destroy(&self, address: &Address) -> bool {
        self.jobs.write().remove(address).is_some()
    }

    /// Number of deployed jobs.
    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    /// Returns true if nothing is deployed.
    pub fn is_empty(&self) -> bool {
        self.jobs.read().is_empty()
    }
}

impl JobResolver for InMemoryJobDirectory {
    fn resolve(&self, address: &Address) -> Option<Arc<dyn Job>> {
        self.jobs.read().get(address).cloned()
    }
}
