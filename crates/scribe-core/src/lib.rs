//! # Scribe Core
//!
//! The domain layer of the Scribe blog service.
//! This crate contains the post model and the persistence port, with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
