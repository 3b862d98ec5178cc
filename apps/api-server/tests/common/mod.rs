//! Shared fixtures: seeding factory, store teardown and app construction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use scribe_core::RepoError;
use scribe_core::domain::{Author, NewPost, Post, PostChanges};
use scribe_core::ports::PostRepository;
use scribe_infra::InMemoryPostRepository;

use api_server::AppState;
use api_server::state::StoreKind;

const FIRST_NAMES: &[&str] = &["Ada", "Alan", "Barbara", "Edsger", "Grace", "Ken"];
const LAST_NAMES: &[&str] = &["Lovelace", "Turing", "Liskov", "Dijkstra", "Hopper", "Thompson"];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
];

/// Build the service under test around `$state`, wired like `main`.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(api_server::observability::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new($state))
                .configure(api_server::handlers::configure_routes),
        )
        .await
    };
}

/// A test server backed by its own in-memory store.
pub struct TestContext {
    pub repo: Arc<InMemoryPostRepository>,
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        let repo = Arc::new(InMemoryPostRepository::new());
        let state = AppState::with_repository(repo.clone(), StoreKind::Memory);
        Self { repo, state }
    }

    /// A context pre-loaded with `count` generated posts.
    pub async fn seeded(count: usize) -> Self {
        let ctx = Self::new();
        seed_posts(&ctx.repo, count).await;
        ctx
    }

    pub async fn tear_down(&self) {
        self.repo.clear().await;
    }
}

/// A store whose every operation fails, as if the database were down.
pub struct UnavailableRepository;

impl UnavailableRepository {
    pub fn state() -> AppState {
        AppState::with_repository(Arc::new(UnavailableRepository), StoreKind::Postgres)
    }
}

fn connection_refused() -> RepoError {
    RepoError::Connection("connection refused".to_string())
}

#[async_trait]
impl PostRepository for UnavailableRepository {
    async fn insert_many(&self, _posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        Err(connection_refused())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Query("relation \"posts\" does not exist".to_string()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Post>, RepoError> {
        Err(connection_refused())
    }

    async fn update_by_id(
        &self,
        _id: &str,
        _changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        Err(connection_refused())
    }

    async fn delete_by_id(&self, _id: &str) -> Result<bool, RepoError> {
        Err(connection_refused())
    }
}

fn words(seed: usize, count: usize) -> String {
    (0..count)
        .map(|i| WORDS[(seed * 7 + i * 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic stand-in for a randomly generated post.
pub fn generate_post(seed: usize) -> NewPost {
    let author = Author::new(
        FIRST_NAMES[seed % FIRST_NAMES.len()],
        LAST_NAMES[(seed / FIRST_NAMES.len() + seed) % LAST_NAMES.len()],
    )
    .unwrap();

    NewPost::new(author, words(seed, 3), words(seed + 1, 60))
        .created_at(Utc::now() - Duration::days(seed as i64 + 1))
}

pub async fn seed_posts(repo: &InMemoryPostRepository, count: usize) -> Vec<Post> {
    repo.insert_many((0..count).map(generate_post).collect())
        .await
        .unwrap()
}
