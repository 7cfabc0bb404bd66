//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports.

pub mod job_directory;

pub use job_directory::InMemoryJobDirectory;
