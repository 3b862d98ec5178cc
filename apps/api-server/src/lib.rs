//! # Scribe API Server
//!
//! Actix-web application serving the `/posts` resource.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod serialization;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
