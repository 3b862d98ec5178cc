//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryOrder, Set,
};

use scribe_core::domain::{NewPost, Post, PostChanges};
use scribe_core::error::RepoError;
use scribe_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository. The author is kept as a JSONB document.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Remove every post. Used to reset the store between test runs.
    pub async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(removed = result.rows_affected, "Deleted all posts");
        Ok(result.rows_affected)
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = posts.into_iter().map(Post::create).collect();
        let models: Vec<post::ActiveModel> = posts.iter().cloned().map(Into::into).collect();

        PostEntity::insert_many(models)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = posts.len(), "Inserted posts");
        Ok(posts)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(map_db_err)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let id = Post::parse_id(id)?;

        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: &str,
        changes: PostChanges,
    ) -> Result<Option<Post>, RepoError> {
        let id = Post::parse_id(id)?;

        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        if changes.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active = model.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        if let Some(author) = changes.author {
            active.author = Set(author.into());
        }

        // The row can vanish between the read and the update.
        let updated = match active.update(&self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(err) => return Err(map_db_err(err)),
        };
        tracing::debug!(post_id = %id, "Updated post");

        Ok(Some(updated.into()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, RepoError> {
        let id = Post::parse_id(id)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %id, removed = result.rows_affected, "Deleted post");
        Ok(result.rows_affected > 0)
    }
}
