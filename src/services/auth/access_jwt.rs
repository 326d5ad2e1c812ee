use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::identity::{Identity, Role};

/// Why a token could not be verified.
///
/// Callers only distinguish `SecretNotConfigured` (server fault) from everything else
/// (client credential failure). The remaining variants exist for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("token verification secret is not configured")]
    SecretNotConfigured,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
}

impl VerifyError {
    pub fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::SecretNotConfigured)
    }
}

impl From<jsonwebtoken::errors::Error> for VerifyError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("token signing secret is not configured")]
    SecretNotConfigured,
    #[error("token lifetime of {0} seconds is out of range")]
    TtlOutOfRange(u64),
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Access token (HS256 JWT) claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl From<AccessTokenClaims> for Identity {
    fn from(claims: AccessTokenClaims) -> Self {
        Identity {
            id: claims.sub,
            role: claims.role,
            email: claims.email,
            name: None,
        }
    }
}

fn non_empty(secret: Option<&str>) -> Option<&str> {
    secret.filter(|s| !s.trim().is_empty())
}

/// Shared-secret (HS256) access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
/// - A verifier without a secret rejects every token with `SecretNotConfigured`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("configured", &self.is_configured())
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = non_empty(secret).map(|s| DecodingKey::from_secret(s.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify signature + `exp`, then decode claims.
    ///
    /// `jsonwebtoken::Validation` checks signature, algorithm and expiry. This method
    /// additionally rejects an empty `sub`.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, VerifyError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(VerifyError::SecretNotConfigured)?;

        let claims = jsonwebtoken::decode::<AccessTokenClaims>(token, key, &self.validation)?.claims;

        if claims.sub.trim().is_empty() {
            return Err(VerifyError::Malformed("empty 'sub' claim".to_string()));
        }

        Ok(claims)
    }
}

/// Signs access tokens with the same shared secret the verifier checks.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: Option<&str>, ttl_seconds: u64) -> Result<Self, IssueError> {
        let secret = non_empty(secret).ok_or(IssueError::SecretNotConfigured)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn with_ttl(self, ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            ..self
        }
    }

    /// Issue an access token for `sub` valid for the configured TTL.
    pub fn issue(&self, sub: &str, role: Role, email: Option<&str>) -> Result<String, IssueError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(IssueError::TtlOutOfRange(self.ttl_seconds))?;

        let claims = AccessTokenClaims {
            sub: sub.to_string(),
            role,
            email: email.map(str::to_string),
            iat: Some(now),
            exp,
            jti: Some(Uuid::new_v4().to_string()),
        };

        self.sign(&claims)
    }

    pub fn sign(&self, claims: &AccessTokenClaims) -> Result<String, IssueError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        Ok(jsonwebtoken::encode(&header, claims, &self.encoding_key)?)
    }
}
