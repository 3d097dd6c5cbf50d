// ── Resource kinds ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The resource families that have a table in the admin UI.
///
/// The lowercase name doubles as the `resources/{name}/filters.json`
/// path segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Events,
    Series,
    Themes,
    Acls,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
