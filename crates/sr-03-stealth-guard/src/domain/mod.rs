//! # Domain Layer (Inner Hexagon)
//!
//! - `entities`: guard flags, executor set, the multisig transaction shape
//! - `services`: the approval decision

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::*;
