/*
 * Responsibility
 * - 環境変数の読み込み (PORT, JWT_SECRET, API_KEY, policy flags, CORS など)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - AuthPolicy snapshot の生成
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::AuthPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::Development);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(ConfigError::Invalid("APP_ENV")),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: Option<String>,
    pub jwt_expires_seconds: u64,
    pub jwt_leeway_seconds: u64,
    pub api_key: Option<String>,

    pub allow_impersonation: bool,
    pub route_rbac_enabled: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<set>"))
            .field("jwt_expires_seconds", &self.jwt_expires_seconds)
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("allow_impersonation", &self.allow_impersonation)
            .field("route_rbac_enabled", &self.route_rbac_enabled)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"))?;

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = var("JWT_SECRET");
        if jwt_secret.is_none() && app_env.is_production() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        let jwt_expires_seconds = match var("JWT_EXPIRES") {
            Some(v) => parse_duration_seconds(&v)
                .filter(|secs| *secs <= MAX_TOKEN_TTL_SECONDS)
                .ok_or(ConfigError::Invalid("JWT_EXPIRES"))?,
            None => 3600,
        };

        let jwt_leeway_seconds = match var("JWT_LEEWAY_SECONDS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let api_key = var("API_KEY");

        // Impersonation is a development convenience; production must opt in explicitly.
        let allow_impersonation = match var("ALLOW_IMPERSONATION") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid("ALLOW_IMPERSONATION"))?,
            None => !app_env.is_production(),
        };

        let route_rbac_enabled = match var("ENABLE_ROUTE_RBAC") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::Invalid("ENABLE_ROUTE_RBAC"))?,
            None => true,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            jwt_expires_seconds,
            jwt_leeway_seconds,
            api_key,
            allow_impersonation,
            route_rbac_enabled,
        })
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        AuthPolicy {
            allow_impersonation: self.allow_impersonation,
            route_rbac_enabled: self.route_rbac_enabled,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Upper bound for `JWT_EXPIRES`.
const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// `900`, `900s`, `15m`, `1h`, `7d` -> seconds. Zero is rejected.
fn parse_duration_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    let (digits, unit) = match value.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&value[..i], c.to_ascii_lowercase()),
        _ => (value, 's'),
    };

    let n: u64 = digits.trim().parse().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };

    n.checked_mul(multiplier).filter(|secs| *secs > 0)
}
