//! Tellerd Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the tellerd ledger
//! daemon. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
