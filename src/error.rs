/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - auth resolver / role gate の失敗を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::resolver::AuthError;
use crate::services::auth::role_gate::GateDenial;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("Missing Authorization header")]
    MissingAuthorization,
    #[error("Invalid token or API key")]
    InvalidCredential,
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("Forbidden")]
    Forbidden,
    #[error("Server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::MissingAuthorization
            | AppError::InvalidCredential
            | AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("INVALID_JSON", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::BadRequest { code, message } => (*code, message.clone()),
            AppError::Forbidden => ("FORBIDDEN", self.to_string()),
            AppError::Internal => ("INTERNAL_SERVER_ERROR", self.to_string()),
            _ => ("UNAUTHORIZED", self.to_string()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::MissingAuthorization,
            AuthError::InvalidCredential => AppError::InvalidCredential,
            // Server-side misconfiguration; details stay in the logs.
            AuthError::Misconfigured => AppError::Internal,
        }
    }
}

impl From<GateDenial> for AppError {
    fn from(e: GateDenial) -> Self {
        match e {
            GateDenial::AuthenticationRequired => AppError::AuthenticationRequired,
            GateDenial::Forbidden => AppError::Forbidden,
        }
    }
}
