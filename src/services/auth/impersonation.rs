//! Development-time impersonation via the `X-Dev-User` header.
//!
//! Two fixed identities exist: `admin` (coordinator) and `vol` (volunteer). The hint is
//! matched case-insensitively. Impersonation only ever fills an empty slot; an identity
//! produced by a real credential is returned untouched.

use crate::services::auth::identity::{Identity, Role};

pub const DEV_USER_HEADER: &str = "x-dev-user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevIdentity {
    pub hint: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub role: Role,
}

impl DevIdentity {
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id.to_string(),
            role: self.role,
            email: Some(self.email.to_string()),
            name: Some(self.name.to_string()),
        }
    }
}

pub const DEV_IDENTITIES: [DevIdentity; 2] = [
    DevIdentity {
        hint: "admin",
        id: "11111111-1111-1111-1111-111111111111",
        name: "Admin User",
        email: "admin@example.com",
        role: Role::Coordinator,
    },
    DevIdentity {
        hint: "vol",
        id: "22222222-2222-2222-2222-222222222222",
        name: "Volunteer User",
        email: "vol@example.com",
        role: Role::Volunteer,
    },
];

pub fn dev_identity(hint: &str) -> Option<Identity> {
    DEV_IDENTITIES
        .iter()
        .find(|dev| dev.hint.eq_ignore_ascii_case(hint))
        .map(DevIdentity::to_identity)
}

/// Fill `resolved` from the hint when allowed and nothing stronger has set it.
pub fn impersonate(
    resolved: Option<Identity>,
    hint: Option<&str>,
    allow_impersonation: bool,
) -> Option<Identity> {
    if resolved.is_some() || !allow_impersonation {
        return resolved;
    }
    hint.and_then(dev_identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_hints_map_to_fixed_identities() {
        let admin = dev_identity("admin").unwrap();
        assert_eq!(admin.id, "11111111-1111-1111-1111-111111111111");
        assert_eq!(admin.role, Role::Coordinator);
        assert_eq!(admin.email.as_deref(), Some("admin@example.com"));
        assert_eq!(admin.name.as_deref(), Some("Admin User"));

        let vol = dev_identity("VOL").unwrap();
        assert_eq!(vol.id, "22222222-2222-2222-2222-222222222222");
        assert_eq!(vol.role, Role::Volunteer);
    }

    #[test]
    fn unknown_hint_yields_nothing() {
        for hint in ["", "root", "administrator", "volunteer", "coordinator"] {
            assert_eq!(dev_identity(hint), None, "{hint}");
        }
    }

    #[test]
    fn disabled_policy_yields_nothing() {
        assert_eq!(impersonate(None, Some("admin"), false), None);
        assert_eq!(impersonate(None, Some("vol"), false), None);
    }

    #[test]
    fn enabled_policy_resolves_hint() {
        let identity = impersonate(None, Some("Admin"), true).unwrap();
        assert_eq!(identity.role, Role::Coordinator);
        assert_eq!(impersonate(None, Some("nobody"), true), None);
        assert_eq!(impersonate(None, None, true), None);
    }

    #[test]
    fn never_overrides_an_existing_identity() {
        let existing = Identity {
            id: "user-9".to_string(),
            role: Role::Volunteer,
            email: None,
            name: None,
        };
        let kept = impersonate(Some(existing.clone()), Some("admin"), true);
        assert_eq!(kept, Some(existing.clone()));

        let kept = impersonate(Some(existing.clone()), Some("admin"), false);
        assert_eq!(kept, Some(existing));
    }
}
