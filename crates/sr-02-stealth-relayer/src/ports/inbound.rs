//! # Driving Port (API - Inbound)

use shared_types::Address;

/// What a transaction guard may observe about the relayer.
pub trait StealthRelayerView: Send + Sync {
    /// Relayer account address.
    fn address(&self) -> Address;

    /// Keeper whose job call is in flight, or `Address::ZERO` outside one.
    fn caller(&self) -> Address;
}
