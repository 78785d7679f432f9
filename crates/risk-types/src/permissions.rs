//! Capability checks used to gate UI actions.
//!
//! Permission strings are `domain.action`. Only the global wildcard is special;
//! `risk_event.*` is an ordinary string and grants nothing by itself.

use crate::UserProfile;

/// Role that bypasses every check.
pub const SUPERADMIN_ROLE: &str = "Superadmin";

/// Capability that satisfies any permission.
pub const WILDCARD: &str = "*";

pub mod risk_event {
    pub const READ: &str = "risk_event.read";
    pub const CREATE: &str = "risk_event.create";
    pub const APPROVE: &str = "risk_event.approve";
}

/// Whether `user` holds `permission`.
pub fn has_permission(user: Option<&UserProfile>, permission: &str) -> bool {
    let Some(user) = user else {
        return false;
    };
    if user.role == SUPERADMIN_ROLE {
        return true;
    }
    let Some(access) = user.access.as_ref() else {
        return false;
    };
    if access.iter().any(|a| a == WILDCARD) {
        return true;
    }
    access.iter().any(|a| a == permission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, access: Option<Vec<&str>>) -> UserProfile {
        let mut u = UserProfile::new("tester", role, vec![]);
        u.access = access.map(|a| a.into_iter().map(String::from).collect());
        u
    }

    #[test]
    fn no_user_is_denied() {
        assert!(!has_permission(None, risk_event::READ));
        assert!(!has_permission(None, WILDCARD));
    }

    #[test]
    fn superadmin_role_bypasses_access_list() {
        let absent = user(SUPERADMIN_ROLE, None);
        let empty = user(SUPERADMIN_ROLE, Some(vec![]));
        for p in [risk_event::READ, risk_event::APPROVE, "anything.at_all", ""] {
            assert!(has_permission(Some(&absent), p));
            assert!(has_permission(Some(&empty), p));
        }
    }

    #[test]
    fn wildcard_grants_everything_without_superadmin() {
        let u = user("Approver", Some(vec!["*"]));
        for p in [risk_event::READ, risk_event::CREATE, "users.delete"] {
            assert!(has_permission(Some(&u), p));
        }
    }

    #[test]
    fn missing_access_list_is_denied() {
        let u = user("Maker", None);
        assert!(!has_permission(Some(&u), risk_event::READ));
    }

    #[test]
    fn exact_membership_only() {
        let u = user("Maker", Some(vec!["risk_event.read", "risk_event.*"]));
        assert!(has_permission(Some(&u), risk_event::READ));
        assert!(!has_permission(Some(&u), risk_event::CREATE));
        assert!(!has_permission(Some(&u), "risk_event"));
        assert!(!has_permission(Some(&u), "Risk_Event.Read"));
    }

    #[test]
    fn role_match_is_case_sensitive() {
        let u = user("superadmin", Some(vec![]));
        assert!(!has_permission(Some(&u), risk_event::READ));
    }
}
