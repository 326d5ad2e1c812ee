/*
 * Responsibility
 * - placeholder handler 共通の response DTO
 * - 誰が (どの auth outcome で) 呼んだかを返す
 */
use serde::Serialize;

use crate::services::auth::{AuthContext, AuthOutcome, Identity};

#[derive(Debug, Serialize)]
pub struct CallerResponse {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl From<&AuthContext> for CallerResponse {
    fn from(ctx: &AuthContext) -> Self {
        let kind = match &ctx.outcome {
            AuthOutcome::Authenticated(_) => "user",
            AuthOutcome::ServiceLevel => "service",
            AuthOutcome::Unauthenticated => "anonymous",
        };

        Self {
            kind,
            identity: ctx.identity().cloned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub message: String,
    pub caller: CallerResponse,
}

impl AckResponse {
    pub fn new(message: impl Into<String>, ctx: &AuthContext) -> Self {
        Self {
            message: message.into(),
            caller: ctx.into(),
        }
    }
}
