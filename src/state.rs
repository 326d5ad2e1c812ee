/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: IdentityResolver, policy: AuthPolicy snapshot
 * - Clone 前提で持つ (内部は Arc/Copy cheap)
 */
use std::sync::Arc;

use crate::services::auth::{AuthPolicy, IdentityResolver};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<IdentityResolver>,
    pub policy: AuthPolicy,
}

impl AppState {
    pub fn new(auth: Arc<IdentityResolver>, policy: AuthPolicy) -> Self {
        Self { auth, policy }
    }
}
