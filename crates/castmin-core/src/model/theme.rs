// ── Theme domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ResourceId, TableRecord, format_date};

/// A visual theme applied to published recordings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ResourceId,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub default: bool,
    /// Number of series using the theme, when the server reports it.
    pub usage: Option<u64>,
}

impl TableRecord for Theme {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "name" => self.name.clone(),
            "description" => self.description.clone().unwrap_or_default(),
            "creator" => self.creator.clone().unwrap_or_default(),
            "creation_date" => format_date(self.creation_date.as_ref()),
            "default" => if self.default { "yes" } else { "" }.to_owned(),
            "usage" => self.usage.map(|u| u.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// A theme with its section switches, shown in the details modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDetails {
    pub id: ResourceId,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub default: bool,
    pub bumper_active: bool,
    pub trailer_active: bool,
    pub title_slide_active: bool,
    pub license_slide_active: bool,
    pub watermark_active: bool,
    pub watermark_position: Option<String>,
}

impl ThemeDetails {
    /// Section names paired with whether they are switched on.
    pub fn sections(&self) -> [(&'static str, bool); 5] {
        [
            ("Bumper", self.bumper_active),
            ("Trailer", self.trailer_active),
            ("Title slide", self.title_slide_active),
            ("License slide", self.license_slide_active),
            ("Watermark", self.watermark_active),
        ]
    }
}
