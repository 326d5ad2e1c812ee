//! CORS policy for browser clients.
//!
//! - Development: permissive (Allow-Origin: *), without credentials. The `X-Dev-User`
//!   impersonation header is allowed so browser tooling can switch identities.
//! - Production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`. An empty list allows
//!   no cross-origin callers.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::services::auth::impersonation::DEV_USER_HEADER;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let mut allowed_headers = vec![
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
    ];
    if config.allow_impersonation {
        allowed_headers.push(HeaderName::from_static(DEV_USER_HEADER));
    }

    let cors = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin),
        ))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    cors.allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers(allowed_headers)
    .max_age(Duration::from_secs(60 * 10))
}
