//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `StealthRelayerView`, read by transaction
//!   guards that trust calls arriving through the relayer
//! - **Driven Ports (Outbound)**: `Job`, `JobResolver`, plus the vault's
//!   `StealthVaultApi` and `shared_types::NativeTransfer`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
