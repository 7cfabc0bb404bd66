//! # Address Set
//!
//! Deduplicated set of addresses that remembers insertion order.
//! Backs the caller registry, stealth authorizations, job registry and
//! executor set.

use crate::value_objects::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Insertion-ordered set of addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet {
    order: Vec<Address>,
    members: HashSet<Address>,
}

impl AddressSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `address`. Returns false if it was already present.
    pub fn insert(&mut self, address: Address) -> bool {
        if !self.members.insert(address) {
            return false;
        }
        self.order.push(address);
        true
    }

    /// Removes `address`. Returns false if it was absent.
    pub fn remove(&mut self, address: &Address) -> bool {
        if !self.members.remove(address) {
            return false;
        }
        self.order.retain(|a| a != address);
        true
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Members in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Address> {
        self.order.clone()
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.order.iter()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<Address> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        let mut set = Self::new();
        for address in iter {
            set.insert(address);
        }
        set
    }
}
