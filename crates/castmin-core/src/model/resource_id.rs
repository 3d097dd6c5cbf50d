// ── Resource identity ──
//
// Themes and ACLs are keyed by database integers, events and series by
// opaque string identifiers. `ResourceId` hides the difference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of any admin resource row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Numeric(i64),
    Text(String),
}

impl ResourceId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Numeric(_) => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_ids_still_resolve() {
        let id: ResourceId = "42".parse().unwrap();
        assert_eq!(id.as_numeric(), Some(42));
        assert_eq!(id.as_text(), Some("42"));
    }

    #[test]
    fn untagged_serde_picks_variant() {
        let ids: Vec<ResourceId> = serde_json::from_str(r#"[7, "abc-1"]"#).unwrap();
        assert_eq!(ids, vec![ResourceId::Numeric(7), ResourceId::Text("abc-1".into())]);
        assert_eq!(ids[1].to_string(), "abc-1");
    }
}
