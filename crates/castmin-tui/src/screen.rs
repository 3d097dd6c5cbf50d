//! Screen identifiers and their routes.

use std::fmt;

use castmin_core::ResourceKind;

/// Primary screens, navigable by number keys 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Events, // 1
    Themes, // 2
    Acls,   // 3
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Events, Self::Themes, Self::Acls];

    pub fn number(self) -> u8 {
        match self {
            Self::Events => 1,
            Self::Themes => 2,
            Self::Acls => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::Themes => "Themes",
            Self::Acls => "ACLs",
        }
    }

    /// Location hash the screen's page is mounted with.
    pub fn hash(self) -> &'static str {
        match self {
            Self::Events => "#!/events/events",
            Self::Themes => "#!/configuration/themes",
            Self::Acls => "#!/users/acls",
        }
    }

    /// Resource whose table the screen shows first.
    pub fn resource(self) -> ResourceKind {
        match self {
            Self::Events => ResourceKind::Events,
            Self::Themes => ResourceKind::Themes,
            Self::Acls => ResourceKind::Acls,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
