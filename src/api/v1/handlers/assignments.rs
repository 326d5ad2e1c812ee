/*
 * Responsibility
 * - volunteer assignment 系 handler
 * - DTO validation → (外部の永続化層) → ack
 */
use axum::{
    Json,
    extract::{Path, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::{
            ack::AckResponse,
            assignments::{AssignVolunteerRequest, UpdateAssignmentStatusRequest},
        },
        extractors::Caller,
    },
    error::AppError,
};

pub async fn assign_volunteer(
    Caller(ctx): Caller,
    Path(event_id): Path<String>,
    payload: Result<Json<AssignVolunteerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AckResponse>), AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_ASSIGNMENT", msg))?;

    Ok((
        StatusCode::CREATED,
        Json(AckResponse::new(
            format!("assign {} to event {event_id} - ok", req.user_id.trim()),
            &ctx,
        )),
    ))
}

pub async fn delete_assignment(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn update_assignment_status(
    Caller(ctx): Caller,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAssignmentStatusRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_STATUS", msg))?;

    Ok(Json(AckResponse::new(
        format!("assignment {id} status {} - ok", req.status),
        &ctx,
    )))
}
