//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `TransactionGuard`, the hook a multisig
//!   wallet calls around every transaction
//! - **Driven Port (Outbound)**: `StealthRelayerView`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
