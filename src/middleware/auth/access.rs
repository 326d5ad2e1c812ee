//! Identity resolution → AuthContext を extensions に入れる
//!
//! - Runs once per request before any handler (public allow-list included).
//! - Rejections short-circuit with 401 / 500; everything else continues with an
//!   `AuthContext` describing the caller and the policy snapshot used.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::resolver::{AuthContext, AuthError, AuthOutcome, AuthRequest};
use crate::state::AppState;

/// API router 全体に identity resolution を掛ける。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // One snapshot per request; the route guard reads it back from the AuthContext.
    let policy = state.policy;

    let resolved = {
        let auth_req = AuthRequest::from_parts(req.method(), req.uri().path(), req.headers());
        state.auth.resolve(&auth_req, policy)
    };

    let outcome = match resolved {
        Ok(outcome) => outcome,
        Err(err @ AuthError::Misconfigured) => {
            tracing::error!(error = %err, "identity resolution failed");
            return Err(err.into());
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected"
            );
            return Err(err.into());
        }
    };

    match &outcome {
        AuthOutcome::Authenticated(identity) => {
            tracing::debug!(user_id = %identity.id, role = %identity.role, "caller authenticated")
        }
        AuthOutcome::ServiceLevel => tracing::debug!("service-level caller"),
        AuthOutcome::Unauthenticated => {}
    }

    // middleware → extractor / route guard への受け渡し
    req.extensions_mut()
        .insert(AuthContext::new(outcome, policy));

    Ok(next.run(req).await)
}
