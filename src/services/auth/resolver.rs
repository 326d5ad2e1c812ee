//! Per-request identity resolution.
//!
//! Evaluation order (first decisive step wins):
//! 1. public allow-list: skip resolution entirely
//! 2. bearer credential: verified token, else service API key, else reject
//! 3. no credential: `X-Dev-User` impersonation when the policy allows it, else reject
//!
//! Each scheme runs at most once. The result depends only on the request input, the
//! resolver's keys and the policy snapshot passed in.

use axum::http::{HeaderMap, Method};
use thiserror::Error;

use crate::services::auth::access_jwt::{TokenVerifier, VerifyError};
use crate::services::auth::api_key::ServiceKeyMatcher;
use crate::services::auth::bearer;
use crate::services::auth::identity::Identity;
use crate::services::auth::impersonation::{self, DEV_USER_HEADER};
use crate::services::auth::policy::{AuthPolicy, PublicRoutes};

/// Result of a successful (non-rejected) resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Verified token or development impersonation.
    Authenticated(Identity),
    /// Matched the service API key; trusted caller without a per-user identity.
    ServiceLevel,
    /// Public route, or an impersonation hint that matched nothing.
    Unauthenticated,
}

impl AuthOutcome {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,
    #[error("credential is neither a valid token nor the service key")]
    InvalidCredential,
    #[error("token verification secret is not configured")]
    Misconfigured,
}

/// What the resolver looks at in a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub authorization: Option<&'a str>,
    pub dev_user: Option<&'a str>,
}

impl<'a> AuthRequest<'a> {
    pub fn from_parts(method: &'a Method, path: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            method,
            path,
            authorization: bearer::authorization_header(headers),
            dev_user: headers
                .get(DEV_USER_HEADER)
                .and_then(|v| v.to_str().ok()),
        }
    }
}

/// Resolution outcome together with the policy snapshot it was computed under.
///
/// Stored in request extensions so that route guards evaluate against the same policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub outcome: AuthOutcome,
    pub policy: AuthPolicy,
}

impl AuthContext {
    pub fn new(outcome: AuthOutcome, policy: AuthPolicy) -> Self {
        Self { outcome, policy }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.outcome.identity()
    }
}

#[derive(Debug, Clone)]
pub struct IdentityResolver {
    verifier: TokenVerifier,
    service_key: ServiceKeyMatcher,
    public_routes: PublicRoutes,
}

impl IdentityResolver {
    pub fn new(
        verifier: TokenVerifier,
        service_key: ServiceKeyMatcher,
        public_routes: PublicRoutes,
    ) -> Self {
        Self {
            verifier,
            service_key,
            public_routes,
        }
    }

    pub fn resolve(
        &self,
        req: &AuthRequest<'_>,
        policy: AuthPolicy,
    ) -> Result<AuthOutcome, AuthError> {
        if self.public_routes.is_public(req.method, req.path) {
            return Ok(AuthOutcome::Unauthenticated);
        }

        if let Some(token) = bearer::extract_bearer(req.authorization) {
            return self.resolve_credential(token);
        }

        // Without a credential only impersonation can still apply.
        let hint = req.dev_user.filter(|_| policy.allow_impersonation);
        if hint.is_none() {
            return Err(AuthError::MissingCredential);
        }

        match impersonation::impersonate(None, hint, policy.allow_impersonation) {
            Some(identity) => {
                tracing::debug!(user_id = %identity.id, role = %identity.role, "impersonating dev user");
                Ok(AuthOutcome::Authenticated(identity))
            }
            None => Ok(AuthOutcome::Unauthenticated),
        }
    }

    fn resolve_credential(&self, token: &str) -> Result<AuthOutcome, AuthError> {
        match self.verifier.verify(token) {
            Ok(claims) => Ok(AuthOutcome::Authenticated(claims.into())),
            Err(VerifyError::SecretNotConfigured) => Err(AuthError::Misconfigured),
            Err(err) => {
                if self.service_key.matches(token) {
                    return Ok(AuthOutcome::ServiceLevel);
                }
                tracing::debug!(error = %err, "bearer credential rejected");
                Err(AuthError::InvalidCredential)
            }
        }
    }
}
