//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so the handlers can name exactly which one is
//! missing instead of failing deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured author as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorPayload>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

/// Request to update a post. Unrecognized fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

/// Serialized post with the author flattened to a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<u64>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_camel_case_author() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "author": { "firstName": "Ada", "lastName": "Lovelace" },
            "title": "Notes",
            "content": "On the analytical engine",
            "created": "1843-09-01T00:00:00.000Z"
        }))
        .unwrap();

        let author = req.author.unwrap();
        assert_eq!(author.first_name.as_deref(), Some("Ada"));
        assert_eq!(author.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(req.created.unwrap().to_rfc3339(), "1843-09-01T00:00:00+00:00");
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let req: UpdatePostRequest = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "title": "New",
            "created": "2020-01-01T00:00:00Z",
            "views": 10
        }))
        .unwrap();

        assert_eq!(req.id.as_deref(), Some("abc"));
        assert_eq!(req.title.as_deref(), Some("New"));
        assert!(req.content.is_none());
    }
}
