//! In-memory post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{NewPost, Post, PostChanges};
use scribe_core::error::RepoError;
use scribe_core::ports::PostRepository;

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Writes to the same id are serialized by the lock.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every stored post.
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        tracing::debug!(removed = store.len(), "Clearing in-memory post store");
        store.clear();
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let mut store = self.store.write().await;

        let inserted: Vec<Post> = posts.into_iter().map(Post::create).collect();
        for post in &inserted {
            store.insert(post.id, post.clone());
        }

        tracing::debug!(count = inserted.len(), "Inserted posts");
        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));

        Ok(posts)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let id = Post::parse_id(id)?;
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let id = Post::parse_id(id)?;
        let mut store = self.store.write().await;

        Ok(store.get_mut(&id).map(|post| {
            post.apply(changes);
            post.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, RepoError> {
        let id = Post::parse_id(id)?;
        Ok(self.store.write().await.remove(&id).is_some())
    }
}
