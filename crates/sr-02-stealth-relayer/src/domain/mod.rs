//! # Domain Layer (Inner Hexagon)
//!
//! Pure relayer logic. NO I/O, NO async, NO locking.
//!
//! - `entities`: configuration, job registry, relayed call and its outcome
//! - `services`: block binding and payment split

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::*;
