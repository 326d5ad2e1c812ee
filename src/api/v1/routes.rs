/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 各 route の許可 role を登録時に固定 (require_roles)
 * - identity resolution (access middleware) の適用は app 側で行う
 */
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::require_roles;
use crate::services::auth::RoleSet;
use crate::state::AppState;

use crate::api::v1::handlers::{
    assignments::{assign_volunteer, delete_assignment, update_assignment_status},
    events::{create_event, delete_event, get_event, list_events, update_event},
    health,
    me::me,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health/alive", get(health::alive))
        .route("/health/ready", get(health::ready))
        .route("/me", require_roles(RoleSet::ANY, get(me)))
        .route("/events", require_roles(RoleSet::ANY, get(list_events)))
        .route("/events", require_roles(RoleSet::COORDINATOR, post(create_event)))
        .route("/events/{id}", require_roles(RoleSet::ANY, get(get_event)))
        .route(
            "/events/{id}",
            require_roles(
                RoleSet::COORDINATOR,
                patch(update_event).delete(delete_event),
            ),
        )
        .route(
            "/events/{event_id}/assign",
            require_roles(RoleSet::COORDINATOR, post(assign_volunteer)),
        )
        .route(
            "/assignments/{id}",
            require_roles(RoleSet::COORDINATOR, delete(delete_assignment)),
        )
        .route(
            "/assignments/{id}/status",
            require_roles(RoleSet::VOLUNTEER, patch(update_assignment_status)),
        )
}
