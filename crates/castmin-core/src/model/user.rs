// ── Current user ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identity and role set of the signed-in user.
///
/// Read-only to the front-end: loaded once after login and used for
/// permission checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub name: Option<String>,
    pub organization: Option<String>,
    pub roles: BTreeSet<String>,
}

impl UserInfo {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Name shown in the header: display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}
