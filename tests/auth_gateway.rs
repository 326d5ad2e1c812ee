#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Router-level tests for identity resolution and route guards.
//!
//! These drive the assembled `/api/v1` router (access middleware + role guards) and check:
//! 1. public routes never need credentials
//! 2. token / API key / impersonation precedence
//! 3. boundary status codes and messages
//! 4. the RBAC bypass switch

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use volunteer_api::app::build_api;
use volunteer_api::services::auth::access_jwt::AccessTokenClaims;
use volunteer_api::services::auth::api_key::ServiceKeyMatcher;
use volunteer_api::services::auth::{
    AuthPolicy, IdentityResolver, PublicRoutes, Role, TokenIssuer, TokenVerifier,
};
use volunteer_api::state::AppState;

const SECRET: &str = "integration-test-secret-0123456789";
const API_KEY: &str = "svc-integration-key";

fn policy(allow_impersonation: bool, route_rbac_enabled: bool) -> AuthPolicy {
    AuthPolicy {
        allow_impersonation,
        route_rbac_enabled,
    }
}

fn app_with(secret: Option<&str>, policy: AuthPolicy) -> Router {
    let resolver = IdentityResolver::new(
        TokenVerifier::new(secret, 0),
        ServiceKeyMatcher::new(Some(API_KEY)),
        PublicRoutes::default(),
    );
    build_api(AppState::new(Arc::new(resolver), policy))
}

fn app(policy: AuthPolicy) -> Router {
    app_with(Some(SECRET), policy)
}

fn issuer() -> TokenIssuer {
    TokenIssuer::new(Some(SECRET), 600).unwrap()
}

fn bearer(sub: &str, role: Role) -> String {
    format!("Bearer {}", issuer().issue(sub, role, None).unwrap())
}

struct Call<'a> {
    method: Method,
    path: &'a str,
    authorization: Option<String>,
    dev_user: Option<&'a str>,
    body: Option<Value>,
}

impl<'a> Call<'a> {
    fn new(method: Method, path: &'a str) -> Self {
        Self {
            method,
            path,
            authorization: None,
            dev_user: None,
            body: None,
        }
    }

    fn auth(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    fn dev_user(mut self, hint: &'a str) -> Self {
        self.dev_user = Some(hint);
        self
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    async fn send(self, app: Router) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(self.method)
            .uri(format!("/api/v1{}", self.path));
        if let Some(value) = self.authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        if let Some(hint) = self.dev_user {
            builder = builder.header("X-Dev-User", hint);
        }
        let body = match self.body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap()
}

#[tokio::test]
async fn public_routes_need_no_credentials() {
    let (status, body) = Call::new(Method::GET, "/health/alive")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    // Even garbage credentials are ignored on the allow-list.
    let (status, _) = Call::new(Method::GET, "/health/ready")
        .auth("Bearer not-a-token")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_routes_work_without_a_secret() {
    let (status, _) = Call::new(Method::GET, "/health/alive")
        .send(app_with(None, policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unmatched_public_path_is_not_rejected_by_auth() {
    // /login is allow-listed but served elsewhere; the gateway must not answer 401.
    let (status, _) = Call::new(Method::POST, "/login")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_authorization_is_401() {
    let (status, body) = Call::new(Method::GET, "/events")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Missing Authorization header");

    let (status, body) = Call::new(Method::GET, "/events")
        .auth("Basic dXNlcjpwYXNz")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Missing Authorization header");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_identity() {
    let (status, body) = Call::new(Method::GET, "/me")
        .auth(bearer("user-42", Role::Volunteer))
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "user-42");
    assert_eq!(body["role"], "volunteer");
}

#[tokio::test]
async fn token_from_another_secret_is_rejected() {
    let foreign = TokenIssuer::new(Some("another-secret-altogether"), 600)
        .unwrap()
        .issue("user-42", Role::Coordinator, None)
        .unwrap();
    let (status, body) = Call::new(Method::GET, "/events")
        .auth(format!("Bearer {foreign}"))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid token or API key");
}

#[tokio::test]
async fn expired_token_is_rejected_without_detail() {
    let now = chrono::Utc::now().timestamp();
    let expired = issuer()
        .sign(&AccessTokenClaims {
            sub: "user-1".to_string(),
            role: Role::Coordinator,
            email: None,
            iat: Some(now - 7200),
            exp: now - 3600,
            jti: None,
        })
        .unwrap();
    let (status, body) = Call::new(Method::GET, "/events")
        .auth(format!("Bearer {expired}"))
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Invalid token or API key");
}

#[tokio::test]
async fn token_wins_over_impersonation() {
    let (status, body) = Call::new(Method::GET, "/me")
        .auth(bearer("user-7", Role::Volunteer))
        .dev_user("admin")
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "volunteer");
    assert_eq!(body["id"], "user-7");

    // ...and so the coordinator-only route stays closed.
    let (status, body) = Call::new(Method::POST, "/events")
        .auth(bearer("user-7", Role::Volunteer))
        .dev_user("admin")
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Forbidden");
}

#[tokio::test]
async fn impersonation_when_allowed() {
    let (status, body) = Call::new(Method::GET, "/me")
        .dev_user("ADMIN")
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "coordinator");
    assert_eq!(body["id"], "11111111-1111-1111-1111-111111111111");
    assert_eq!(body["email"], "admin@example.com");

    let (status, body) = Call::new(Method::GET, "/me")
        .dev_user("vol")
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "volunteer");
    assert_eq!(body["name"], "Volunteer User");
}

#[tokio::test]
async fn unknown_hint_is_authentication_required_at_the_gate() {
    let (status, body) = Call::new(Method::GET, "/events")
        .dev_user("mallory")
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Authentication required");
}

#[tokio::test]
async fn impersonation_disabled_ignores_hint() {
    let (status, body) = Call::new(Method::GET, "/me")
        .dev_user("admin")
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Missing Authorization header");
}

#[tokio::test]
async fn role_gate_enforces_allowed_roles() {
    let volunteer = bearer("v-1", Role::Volunteer);
    let coordinator = bearer("c-1", Role::Coordinator);

    let (status, _) = Call::new(Method::GET, "/events")
        .auth(volunteer.clone())
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = Call::new(Method::DELETE, "/events/abc")
        .auth(volunteer.clone())
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "Forbidden");

    let (status, _) = Call::new(Method::DELETE, "/events/abc")
        .auth(coordinator.clone())
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = Call::new(Method::PATCH, "/assignments/9/status")
        .auth(coordinator)
        .json(json!({"status": "accepted"}))
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = Call::new(Method::PATCH, "/assignments/9/status")
        .auth(volunteer)
        .json(json!({"status": "accepted"}))
        .send(app(policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caller"]["kind"], "user");
    assert_eq!(body["caller"]["identity"]["id"], "v-1");
}

#[tokio::test]
async fn service_key_is_denied_on_role_gated_routes() {
    let (status, body) = Call::new(Method::GET, "/events")
        .auth(format!("Bearer {API_KEY}"))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Authentication required");
}

#[tokio::test]
async fn disabled_rbac_lets_resolved_callers_through() {
    let (status, body) = Call::new(Method::POST, "/events")
        .auth(format!("Bearer {API_KEY}"))
        .send(app(policy(false, false)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["caller"]["kind"], "service");

    let (status, _) = Call::new(Method::POST, "/events")
        .auth(bearer("v-1", Role::Volunteer))
        .send(app(policy(false, false)))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = Call::new(Method::GET, "/events")
        .dev_user("nobody")
        .send(app(policy(true, false)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caller"]["kind"], "anonymous");

    // Credential rejection happens before the gate and is not bypassed.
    let (status, _) = Call::new(Method::GET, "/events")
        .auth("Bearer nope")
        .send(app(policy(false, false)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_secret_is_a_server_error() {
    let (status, body) = Call::new(Method::GET, "/events")
        .auth(bearer("c-1", Role::Coordinator))
        .send(app_with(None, policy(false, true)))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Server error");
}

#[tokio::test]
async fn invalid_assignment_payload_is_400() {
    let (status, body) = Call::new(Method::PATCH, "/assignments/9/status")
        .dev_user("vol")
        .json(json!({"status": "maybe"}))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn same_input_same_outcome() {
    let router = app(policy(true, true));
    let token = bearer("c-1", Role::Coordinator);

    let first = Call::new(Method::POST, "/events/e-1/assign")
        .auth(token.clone())
        .json(json!({"userId": "v-1"}))
        .send(router.clone())
        .await;
    let second = Call::new(Method::POST, "/events/e-1/assign")
        .auth(token)
        .json(json!({"userId": "v-1"}))
        .send(router)
        .await;
    assert_eq!(first.0, StatusCode::CREATED);
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_assignment_bodies_are_400_with_error_body() {
    let (status, body) = Call::new(Method::POST, "/events/e-1/assign")
        .dev_user("admin")
        .json(json!({}))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ASSIGNMENT");
    assert_eq!(error_message(&body), "userId is required");

    let (status, body) = Call::new(Method::PATCH, "/assignments/9/status")
        .dev_user("vol")
        .json(json!({}))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_STATUS");
}

#[tokio::test]
async fn mistyped_assignment_body_is_400_with_error_body() {
    let (status, body) = Call::new(Method::POST, "/events/e-1/assign")
        .dev_user("admin")
        .json(json!({"userId": 42}))
        .send(app(policy(true, true)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_JSON");
}
