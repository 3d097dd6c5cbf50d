// ── Role-based permission checks ──
//
// Permission tokens are plain role strings. A control is built only when
// the current user holds every role it requires.

use crate::model::UserInfo;

pub const ROLE_UI_EVENTS_VIEW: &str = "ROLE_UI_EVENTS_VIEW";
pub const ROLE_UI_EVENTS_CREATE: &str = "ROLE_UI_EVENTS_CREATE";
pub const ROLE_UI_EVENTS_DELETE: &str = "ROLE_UI_EVENTS_DELETE";
pub const ROLE_UI_EVENTS_COUNTERS_VIEW: &str = "ROLE_UI_EVENTS_COUNTERS_VIEW";
pub const ROLE_UI_EVENTS_DETAILS_SCHEDULING_EDIT: &str = "ROLE_UI_EVENTS_DETAILS_SCHEDULING_EDIT";
pub const ROLE_UI_EVENTS_DETAILS_METADATA_EDIT: &str = "ROLE_UI_EVENTS_DETAILS_METADATA_EDIT";
pub const ROLE_UI_SERIES_VIEW: &str = "ROLE_UI_SERIES_VIEW";
pub const ROLE_UI_TASKS_CREATE: &str = "ROLE_UI_TASKS_CREATE";
pub const ROLE_UI_THEMES_EDIT: &str = "ROLE_UI_THEMES_EDIT";
pub const ROLE_UI_THEMES_DELETE: &str = "ROLE_UI_THEMES_DELETE";
pub const ROLE_UI_ACLS_EDIT: &str = "ROLE_UI_ACLS_EDIT";
pub const ROLE_UI_ACLS_DELETE: &str = "ROLE_UI_ACLS_DELETE";

/// Exact-match role membership. No user means no access.
pub fn has_access(role: &str, user: Option<&UserInfo>) -> bool {
    user.is_some_and(|u| u.has_role(role))
}

/// True when the user holds every listed role.
pub fn has_all(roles: &[&str], user: Option<&UserInfo>) -> bool {
    roles.iter().all(|role| has_access(role, user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> UserInfo {
        UserInfo {
            username: "admin".into(),
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
            ..UserInfo::default()
        }
    }

    #[test]
    fn membership_is_exact() {
        let u = user(&[ROLE_UI_ACLS_EDIT]);
        assert!(has_access(ROLE_UI_ACLS_EDIT, Some(&u)));
        assert!(!has_access(ROLE_UI_ACLS_DELETE, Some(&u)));
        assert!(!has_access("ROLE_UI_ACLS", Some(&u)));
        assert!(!has_access("role_ui_acls_edit", Some(&u)));
    }

    #[test]
    fn anonymous_has_nothing() {
        assert!(!has_access(ROLE_UI_EVENTS_VIEW, None));
        assert!(!has_all(&[ROLE_UI_EVENTS_VIEW], None));
    }

    #[test]
    fn has_all_requires_every_role() {
        let u = user(&[ROLE_UI_EVENTS_DETAILS_METADATA_EDIT]);
        let both = [
            ROLE_UI_EVENTS_DETAILS_SCHEDULING_EDIT,
            ROLE_UI_EVENTS_DETAILS_METADATA_EDIT,
        ];
        assert!(!has_all(&both, Some(&u)));

        let u = user(&both);
        assert!(has_all(&both, Some(&u)));
    }
}
