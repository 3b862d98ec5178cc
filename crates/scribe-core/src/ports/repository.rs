use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Post repository - the sole owner of post storage.
///
/// Identifiers arrive as raw strings; implementations parse them with
/// [`Post::parse_id`] and report [`RepoError::MalformedId`] on failure.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a batch of posts, assigning ids and default timestamps.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;

    /// All stored posts, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Find a post by its id. `None` when no post matches.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Apply the present fields of `changes` and return the updated post.
    async fn update_by_id(&self, id: &str, changes: PostChanges)
    -> Result<Option<Post>, RepoError>;

    /// Remove a post. Returns whether a post was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, RepoError>;

    /// Store a single post.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        self.insert_many(vec![post])
            .await?
            .pop()
            .ok_or_else(|| RepoError::Query("insert returned no rows".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Author;

    /// Repository that echoes inserts and stores nothing.
    struct EchoRepository;

    #[async_trait]
    impl PostRepository for EchoRepository {
        async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
            Ok(posts.into_iter().map(Post::create).collect())
        }

        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(0)
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn update_by_id(
            &self,
            _id: &str,
            _changes: PostChanges,
        ) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: &str) -> Result<bool, RepoError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_insert_delegates_to_insert_many() {
        let author = Author::new("Grace", "Hopper").unwrap();
        let post = EchoRepository
            .insert(NewPost::new(author.clone(), "Compilers", "..."))
            .await
            .unwrap();

        assert_eq!(post.author, author);
        assert_eq!(post.title, "Compilers");
    }
}
