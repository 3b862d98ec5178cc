//! Post resource handlers.
//!
//! Each handler validates its input before touching the repository and
//! performs at most one storage mutation.

use actix_web::{HttpResponse, web};

use scribe_core::DomainError;
use scribe_core::domain::{Author, NewPost, PostChanges};
use scribe_shared::dto::{AuthorPayload, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::serialization::post_response;
use crate::state::AppState;

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.iter().map(post_response).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = new_post_from_request(body.into_inner())?;
    let post = state.posts.insert(new_post).await?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(post_response(&post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id.as_deref()
        && body_id != id
    {
        return Err(AppError::BadRequest(format!(
            "Request path id ({}) and request body id ({}) must match",
            id, body_id
        )));
    }

    let changes = changes_from_request(req)?;
    let post = state
        .posts
        .update_by_id(&id, changes)
        .await?
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(post_response(&post)))
}

/// DELETE /posts/{id}
///
/// Succeeds whether or not the post existed.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.delete_by_id(&id).await?;

    tracing::info!(post_id = %id, removed, "Post deleted");
    Ok(HttpResponse::NoContent().finish())
}

fn not_found(id: &str) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id: id.to_string(),
    }
}

fn required(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "Missing `{}` in request body",
            field
        ))),
    }
}

fn author_from_payload(payload: AuthorPayload) -> AppResult<Author> {
    let first_name = required(payload.first_name, "author.firstName")?;
    let last_name = required(payload.last_name, "author.lastName")?;
    Ok(Author::new(first_name, last_name)?)
}

/// Validate a create request, reporting the first missing field.
fn new_post_from_request(req: CreatePostRequest) -> AppResult<NewPost> {
    let author = author_from_payload(req.author.unwrap_or_default())?;
    let title = required(req.title, "title")?;
    let content = required(req.content, "content")?;

    let mut post = NewPost::new(author, title, content);
    post.created = req.created;
    Ok(post)
}

/// Keep only the mutable fields of an update request.
fn changes_from_request(req: UpdatePostRequest) -> AppResult<PostChanges> {
    if req.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(DomainError::Validation("title must not be empty".to_string()).into());
    }

    Ok(PostChanges {
        title: req.title,
        content: req.content,
        author: req.author.map(author_from_payload).transpose()?,
    })
}
