/*
 * Responsibility
 * - /events 系 handler (route guard 通過後に呼ばれる)
 * - 永続化は外部。ここでは誰がどの操作をしたかだけを返す
 */
use axum::{Json, extract::Path, http::StatusCode};

use crate::api::v1::{dto::ack::AckResponse, extractors::Caller};

pub async fn create_event(Caller(ctx): Caller) -> (StatusCode, Json<AckResponse>) {
    (
        StatusCode::CREATED,
        Json(AckResponse::new("create event - ok (coordinator)", &ctx)),
    )
}

pub async fn list_events(Caller(ctx): Caller) -> Json<AckResponse> {
    Json(AckResponse::new("list events - ok", &ctx))
}

pub async fn get_event(Caller(ctx): Caller, Path(id): Path<String>) -> Json<AckResponse> {
    Json(AckResponse::new(format!("get event {id} - ok"), &ctx))
}

pub async fn update_event(Caller(ctx): Caller, Path(id): Path<String>) -> Json<AckResponse> {
    Json(AckResponse::new(
        format!("update event {id} - ok (coordinator)"),
        &ctx,
    ))
}

pub async fn delete_event(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}
