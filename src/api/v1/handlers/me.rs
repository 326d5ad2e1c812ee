use axum::Json;

use crate::api::v1::extractors::CurrentIdentity;
use crate::services::auth::Identity;

/// GET /me: the identity resolved for this request.
pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<Identity> {
    Json(identity)
}
