/*
 * Responsibility
 * - AuthPolicy: immutable snapshot of the impersonation / route RBAC switches
 * - PublicRoutes: method + path allow-list that skips identity resolution
 */
use axum::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub allow_impersonation: bool,
    pub route_rbac_enabled: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            allow_impersonation: false,
            route_rbac_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathMatch {
    Exact(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PublicRoute {
    method: Method,
    path: PathMatch,
}

impl PublicRoute {
    fn matches(&self, method: &Method, path: &str) -> bool {
        if self.method != *method {
            return false;
        }
        match &self.path {
            PathMatch::Exact(p) => path == p,
            PathMatch::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// Routes reachable without any credential.
///
/// Paths are relative to the API root the auth middleware is mounted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRoutes {
    routes: Vec<PublicRoute>,
}

impl PublicRoutes {
    pub fn none() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn exact(mut self, method: Method, path: impl Into<String>) -> Self {
        self.routes.push(PublicRoute {
            method,
            path: PathMatch::Exact(path.into()),
        });
        self
    }

    pub fn prefix(mut self, method: Method, prefix: impl Into<String>) -> Self {
        self.routes.push(PublicRoute {
            method,
            path: PathMatch::Prefix(prefix.into()),
        });
        self
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.routes.iter().any(|r| r.matches(method, path))
    }
}

/// Health checks, registration and login.
impl Default for PublicRoutes {
    fn default() -> Self {
        Self::none()
            .prefix(Method::GET, "/health")
            .exact(Method::POST, "/register")
            .exact(Method::POST, "/login")
    }
}
