/*
 * Responsibility
 * - GET /health/alive, GET /health/ready (疎通用)
 * - public allow-list 対象なので credential 不要
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn alive() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

// No backing store to probe; readiness equals liveness for now.
pub async fn ready() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ready"})))
}
