//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! Without `postgres` only the in-memory repository is available.

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, connect};
