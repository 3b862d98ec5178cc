//! Post entity for SeaORM.

use sea_orm::{FromJsonQueryResult, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub author: AuthorDocument,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created: DateTimeWithTimeZone,
}

/// The author as stored: a `{"firstName", "lastName"}` JSONB document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDocument {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<AuthorDocument> for scribe_core::domain::Author {
    fn from(doc: AuthorDocument) -> Self {
        Self {
            first_name: doc.first_name,
            last_name: doc.last_name,
        }
    }
}

impl From<scribe_core::domain::Author> for AuthorDocument {
    fn from(author: scribe_core::domain::Author) -> Self {
        Self {
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for scribe_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: model.author.into(),
            title: model.title,
            content: model.content,
            created: model.created.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<scribe_core::domain::Post> for ActiveModel {
    fn from(post: scribe_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author: Set(post.author.into()),
            title: Set(post.title),
            content: Set(post.content),
            created: Set(post.created.into()),
        }
    }
}
