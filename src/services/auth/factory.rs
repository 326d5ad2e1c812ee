/// Factory: build the auth services from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::access_jwt::{IssueError, TokenIssuer, TokenVerifier};
use crate::services::auth::api_key::ServiceKeyMatcher;
use crate::services::auth::policy::PublicRoutes;
use crate::services::auth::resolver::IdentityResolver;

pub fn build_resolver(config: &Config) -> Arc<IdentityResolver> {
    let verifier = TokenVerifier::new(config.jwt_secret.as_deref(), config.jwt_leeway_seconds);
    let service_key = ServiceKeyMatcher::new(config.api_key.as_deref());

    if !verifier.is_configured() {
        tracing::warn!("JWT_SECRET is not set; bearer tokens will fail with a server error");
    }
    if !service_key.is_configured() {
        tracing::info!("API_KEY is not set; service-level access is disabled");
    }

    Arc::new(IdentityResolver::new(
        verifier,
        service_key,
        PublicRoutes::default(),
    ))
}

pub fn build_token_issuer(config: &Config) -> Result<TokenIssuer, IssueError> {
    TokenIssuer::new(config.jwt_secret.as_deref(), config.jwt_expires_seconds)
}
