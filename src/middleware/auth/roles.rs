//! Per-route role guard.
//!
//! ```ignore
//! .route("/events", require_roles(RoleSet::COORDINATOR, post(create_event)))
//! ```
//!
//! The guard reads the `AuthContext` left by the access middleware. A request that
//! reaches a guard without one is treated as unauthenticated.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::identity::RoleSet;
use crate::services::auth::resolver::AuthContext;
use crate::services::auth::role_gate;

#[derive(Debug, Clone, Copy)]
struct RoleGuard {
    allowed: RoleSet,
}

/// Wrap every handler of `method_router` with a role check against `allowed`.
pub fn require_roles<S>(allowed: RoleSet, method_router: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    method_router.route_layer(middleware::from_fn_with_state(
        RoleGuard { allowed },
        role_guard,
    ))
}

async fn role_guard(
    State(guard): State<RoleGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ctx) = req.extensions().get::<AuthContext>() else {
        tracing::warn!("role guard reached without auth context");
        return Err(AppError::AuthenticationRequired);
    };

    if let Err(denial) = role_gate::authorize(ctx.policy, &ctx.outcome, guard.allowed) {
        tracing::warn!(
            reason = %denial,
            allowed = ?guard.allowed,
            role = ?ctx.identity().map(|i| i.role),
            path = %req.uri().path(),
            "route access denied"
        );
        return Err(denial.into());
    }

    Ok(next.run(req).await)
}
