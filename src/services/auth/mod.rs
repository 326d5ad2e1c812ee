pub mod access_jwt;
pub mod api_key;
pub mod bearer;
pub mod factory;
pub mod identity;
pub mod impersonation;
pub mod policy;
pub mod resolver;
pub mod role_gate;

pub use access_jwt::{TokenIssuer, TokenVerifier};
pub use factory::{build_resolver, build_token_issuer};
pub use identity::{Identity, Role, RoleSet};
pub use policy::{AuthPolicy, PublicRoutes};
pub use resolver::{AuthContext, AuthOutcome, IdentityResolver};
