//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `StealthVaultApi`, the validation surface
//!   calling contracts (relayers, embedded `StealthTx` guards) depend on
//! - **Driven Port (Outbound)**: `shared_types::NativeTransfer`

pub mod inbound;

pub use inbound::*;
