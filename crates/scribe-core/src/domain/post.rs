use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Author of a post. Both names are always present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Build an author, rejecting blank names.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "author.firstName must not be empty".to_string(),
            ));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "author.lastName must not be empty".to_string(),
            ));
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// Display form used on the wire: `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Post entity - a stored blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl Post {
    /// Materialize a candidate post with a fresh id.
    ///
    /// `created` defaults to now when the candidate does not carry one.
    pub fn create(new: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: new.author,
            title: new.title,
            content: new.content,
            created: new.created.unwrap_or_else(Utc::now),
        }
    }

    /// Parse a post identifier into the native key format.
    pub fn parse_id(id: &str) -> Result<Uuid, RepoError> {
        Uuid::parse_str(id).map_err(|_| RepoError::MalformedId(id.to_string()))
    }

    /// Apply a partial update in place. `id` and `created` never change.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(author: Author, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author,
            title: title.into(),
            content: content.into(),
            created: None,
        }
    }

    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Mutable fields of a post. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}
