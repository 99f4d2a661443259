//! SQLite storage implementation for the tellerd ledger daemon.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `tellerd-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations (embedded)
//! - The single-writer actor that serializes all ledger mutations
//! - Repository implementations for accounts and transactions
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Every mutation runs through the writer actor's single connection inside
//! an immediate transaction, giving the ledger one process-wide critical
//! section for the process lifetime.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod transactions;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from tellerd-core for convenience
pub use tellerd_core::errors::{DatabaseError, Error, Result};
