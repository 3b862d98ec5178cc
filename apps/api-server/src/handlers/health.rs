//! Health check endpoint.

use actix_web::{HttpResponse, web};
use scribe_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - reports server status and store reachability.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, posts) = match state.posts.count().await {
        Ok(count) => ("ok", Some(count)),
        Err(e) => {
            tracing::warn!("Health check could not reach the store: {}", e);
            ("degraded", None)
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.as_str().to_string(),
        posts,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if posts.is_some() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
