//! # Driven Ports (SPI - Outbound)
//!
//! The guard only needs to see which keeper the relayer is acting for.

pub use sr_02_stealth_relayer::ports::inbound::StealthRelayerView;
