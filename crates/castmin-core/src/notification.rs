// ── User notifications ──
//
// Fire-and-forget toasts. The orchestrating layer pushes one on every
// explicit success or failure branch; the TUI renders and expires them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const THEME_CREATED: &str = "THEME_CREATED";
pub const THEME_NOT_CREATED: &str = "THEME_NOT_CREATED";
pub const THEME_DELETED: &str = "THEME_DELETED";
pub const THEME_NOT_DELETED: &str = "THEME_NOT_DELETED";
pub const ACL_DELETED: &str = "ACL_DELETED";
pub const ACL_NOT_DELETED: &str = "ACL_NOT_DELETED";
pub const EVENTS_DELETED: &str = "EVENTS_DELETED";
pub const EVENTS_NOT_DELETED: &str = "EVENTS_NOT_DELETED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// How long a toast of this severity stays on screen.
    pub fn default_duration(self) -> Duration {
        match self {
            Self::Success | Self::Info => Duration::from_secs(5),
            Self::Warning | Self::Error => Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    /// Message key, e.g. [`THEME_CREATED`].
    pub key: String,
    /// Optional detail (usually the error text).
    pub context: Option<String>,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Notification {
    pub fn new(id: u64, severity: Severity, key: impl Into<String>) -> Self {
        Self {
            id,
            severity,
            key: key.into(),
            context: None,
            created_at: Utc::now(),
            duration: severity.default_duration(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(self.duration)
            .map(|d| now >= self.created_at + d)
            .unwrap_or(false)
    }

    /// Human text for the key: `THEME_NOT_CREATED` → "Theme not created".
    pub fn message(&self) -> String {
        let lower = self.key.replace('_', " ").to_lowercase();
        let mut chars = lower.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_linger_longer() {
        let ok = Notification::new(1, Severity::Success, THEME_CREATED);
        let err = Notification::new(2, Severity::Error, THEME_NOT_CREATED);
        assert!(err.duration > ok.duration);
    }

    #[test]
    fn expiry_follows_duration() {
        let n = Notification::new(1, Severity::Info, ACL_DELETED);
        assert!(!n.is_expired(n.created_at));
        assert!(n.is_expired(n.created_at + chrono::Duration::seconds(6)));
    }

    #[test]
    fn message_humanizes_key() {
        let n = Notification::new(1, Severity::Error, EVENTS_NOT_DELETED);
        assert_eq!(n.message(), "Events not deleted");
    }
}
