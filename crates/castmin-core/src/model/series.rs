// ── Series domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ResourceId, TableRecord, format_date};

/// A series groups related events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: ResourceId,
    pub title: String,
    pub organizers: Vec<String>,
    pub contributors: Vec<String>,
    pub created_by: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub license: Option<String>,
}

impl TableRecord for Series {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "title" => self.title.clone(),
            "organizers" => self.organizers.join(", "),
            "contributors" => self.contributors.join(", "),
            "createdBy" | "created_by" => self.created_by.clone().unwrap_or_default(),
            "creation_date" => format_date(self.creation_date.as_ref()),
            "language" => self.language.clone().unwrap_or_default(),
            "license" => self.license.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}
