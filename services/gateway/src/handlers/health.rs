//! Liveness probe

use axum::response::IntoResponse;

/// Plain-text liveness response
pub async fn health() -> impl IntoResponse {
    "OK"
}
