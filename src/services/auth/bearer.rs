//! `Authorization: Bearer <token>` extraction.

use axum::http::{HeaderMap, header};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Returns the bearer token from a raw `Authorization` value.
///
/// The prefix is matched case-sensitively. A token that is empty after trimming is treated
/// the same as a missing header.
pub fn extract_bearer(header_value: Option<&str>) -> Option<&str> {
    let token = header_value?.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

/// Raw `Authorization` header value. Non-UTF-8 values count as absent.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}
