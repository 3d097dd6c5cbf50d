// ── Access-control list domain types ──

use serde::{Deserialize, Serialize};

use super::{ResourceId, TableRecord};

/// A named ACL template as listed in the ACL table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub id: ResourceId,
    pub name: String,
}

impl TableRecord for Acl {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "name" => self.name.clone(),
            _ => String::new(),
        }
    }
}

/// One access-control entry: a role allowed (or denied) an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclEntry {
    pub role: String,
    pub action: String,
    pub allow: bool,
}

/// An ACL with its entries, shown in the details modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclDetails {
    pub id: ResourceId,
    pub name: String,
    pub organization: Option<String>,
    pub entries: Vec<AclEntry>,
}

impl AclDetails {
    /// Roles with their allowed actions, grouped and sorted by role.
    pub fn policies(&self) -> Vec<(String, Vec<String>)> {
        let mut grouped: std::collections::BTreeMap<&str, Vec<String>> =
            std::collections::BTreeMap::new();
        for entry in self.entries.iter().filter(|e| e.allow) {
            grouped
                .entry(entry.role.as_str())
                .or_default()
                .push(entry.action.clone());
        }
        grouped
            .into_iter()
            .map(|(role, actions)| (role.to_owned(), actions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_group_allowed_actions_by_role() {
        let details = AclDetails {
            id: ResourceId::Numeric(1),
            name: "public".into(),
            organization: None,
            entries: vec![
                AclEntry { role: "ROLE_USER".into(), action: "read".into(), allow: true },
                AclEntry { role: "ROLE_ADMIN".into(), action: "write".into(), allow: true },
                AclEntry { role: "ROLE_USER".into(), action: "write".into(), allow: false },
                AclEntry { role: "ROLE_ADMIN".into(), action: "read".into(), allow: true },
            ],
        };

        assert_eq!(
            details.policies(),
            vec![
                ("ROLE_ADMIN".to_owned(), vec!["write".to_owned(), "read".to_owned()]),
                ("ROLE_USER".to_owned(), vec!["read".to_owned()]),
            ]
        );
    }
}
