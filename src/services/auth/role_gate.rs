use thiserror::Error;

use crate::services::auth::identity::RoleSet;
use crate::services::auth::policy::AuthPolicy;
use crate::services::auth::resolver::AuthOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateDenial {
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("forbidden")]
    Forbidden,
}

/// Decide whether a resolved caller may pass a route guarded by `allowed`.
///
/// Service-level callers carry no role and are treated like unauthenticated ones here:
/// API-key access is meant for routes that have no role guard.
pub fn authorize(
    policy: AuthPolicy,
    outcome: &AuthOutcome,
    allowed: RoleSet,
) -> Result<(), GateDenial> {
    if !policy.route_rbac_enabled {
        return Ok(());
    }

    match outcome {
        AuthOutcome::Unauthenticated | AuthOutcome::ServiceLevel => {
            Err(GateDenial::AuthenticationRequired)
        }
        AuthOutcome::Authenticated(identity) if allowed.contains(identity.role) => Ok(()),
        AuthOutcome::Authenticated(_) => Err(GateDenial::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::identity::{Identity, Role};

    fn enabled() -> AuthPolicy {
        AuthPolicy {
            allow_impersonation: false,
            route_rbac_enabled: true,
        }
    }

    fn as_role(role: Role) -> AuthOutcome {
        AuthOutcome::Authenticated(Identity {
            id: "u".to_string(),
            role,
            email: None,
            name: None,
        })
    }

    #[test]
    fn disabled_rbac_permits_everything() {
        let policy = AuthPolicy {
            route_rbac_enabled: false,
            ..enabled()
        };
        for outcome in [
            AuthOutcome::Unauthenticated,
            AuthOutcome::ServiceLevel,
            as_role(Role::Volunteer),
            as_role(Role::Coordinator),
        ] {
            assert_eq!(authorize(policy, &outcome, RoleSet::COORDINATOR), Ok(()));
            assert_eq!(authorize(policy, &outcome, RoleSet::EMPTY), Ok(()));
        }
    }

    #[test]
    fn missing_identity_requires_authentication() {
        assert_eq!(
            authorize(enabled(), &AuthOutcome::Unauthenticated, RoleSet::ANY),
            Err(GateDenial::AuthenticationRequired)
        );
        assert_eq!(
            authorize(enabled(), &AuthOutcome::ServiceLevel, RoleSet::ANY),
            Err(GateDenial::AuthenticationRequired)
        );
    }

    #[test]
    fn role_membership_decides() {
        assert_eq!(
            authorize(enabled(), &as_role(Role::Volunteer), RoleSet::COORDINATOR),
            Err(GateDenial::Forbidden)
        );
        assert_eq!(
            authorize(enabled(), &as_role(Role::Volunteer), RoleSet::ANY),
            Ok(())
        );
        assert_eq!(
            authorize(enabled(), &as_role(Role::Coordinator), RoleSet::COORDINATOR),
            Ok(())
        );
        assert_eq!(
            authorize(enabled(), &as_role(Role::Coordinator), RoleSet::VOLUNTEER),
            Err(GateDenial::Forbidden)
        );
    }

    #[test]
    fn empty_role_set_admits_nobody() {
        assert_eq!(
            authorize(enabled(), &as_role(Role::Coordinator), RoleSet::EMPTY),
            Err(GateDenial::Forbidden)
        );
    }
}
