//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::PostRepository;
use scribe_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use scribe_infra::{PostgresPostRepository, connect};

/// Which backend the post repository talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Memory => "memory",
        }
    }
}

/// Shared application state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub store: StoreKind,
}

impl AppState {
    /// Wrap an already-built repository.
    pub fn with_repository(posts: Arc<dyn PostRepository>, store: StoreKind) -> Self {
        Self { posts, store }
    }

    /// In-memory state, used when no database is configured.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), StoreKind::Memory)
    }

    /// Build the application state with the appropriate repository.
    ///
    /// A configured database that cannot be reached is an error.
    #[cfg_attr(not(feature = "postgres"), allow(unused_variables))]
    pub async fn new(db_config: Option<&DatabaseConfig>) -> anyhow::Result<Self> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        #[cfg(feature = "postgres")]
        let state = {
            let conn = connect(config).await?;
            Self::with_repository(
                Arc::new(PostgresPostRepository::new(conn)),
                StoreKind::Postgres,
            )
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::warn!(
                "Built without postgres feature - ignoring DATABASE_URL, using in-memory repository"
            );
            Self::in_memory()
        };

        tracing::info!(store = state.store.as_str(), "Application state initialized");
        Ok(state)
    }
}
