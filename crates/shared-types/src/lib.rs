//! # Shared Types Crate
//!
//! Primitives, host capabilities and the failure taxonomy shared by the
//! stealth vault, relayer and guard subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Authenticated Caller**: Identity comes from `CallContext.caller` only;
//!   payloads never carry their own requester field.
//! - **Closed Errors**: Every hard failure is a `StealthError` variant.

pub mod address_set;
pub mod bank;
pub mod context;
pub mod errors;
pub mod gas;
pub mod governance;
pub mod value_objects;

pub use address_set::AddressSet;
pub use bank::{InMemoryBank, NativeTransfer};
pub use context::{BlockContext, CallContext};
pub use errors::*;
pub use governance::Governance;
pub use value_objects::*;
