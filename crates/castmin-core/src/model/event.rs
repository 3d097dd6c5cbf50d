// ── Event domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ResourceId, TableRecord, format_date, format_time};

/// A recording, scheduled or already processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: ResourceId,
    pub title: String,
    pub presenters: Vec<String>,
    pub series_id: Option<String>,
    pub series_name: Option<String>,
    pub location: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub technical_start: Option<DateTime<Utc>>,
    pub technical_end: Option<DateTime<Utc>>,
    /// Raw workflow status key (e.g. `EVENTS.EVENTS.STATUS.PROCESSED`).
    pub status: Option<String>,
    pub displayable_status: Option<String>,
    pub has_comments: bool,
    pub has_open_comments: bool,
    pub needs_cutting: bool,
}

impl Event {
    /// Last segment of the status key, which is what tables display.
    pub fn status_label(&self) -> String {
        self.displayable_status
            .as_deref()
            .or(self.status.as_deref())
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or_default()
            .to_owned()
    }
}

impl TableRecord for Event {
    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "title" => self.title.clone(),
            "presenter" => self.presenters.join(", "),
            "series_name" => self.series_name.clone().unwrap_or_default(),
            "technical_date" => format_date(self.technical_start.as_ref()),
            "technical_start" => format_time(self.technical_start.as_ref()),
            "technical_end" => format_time(self.technical_end.as_ref()),
            "location" => self.location.clone().unwrap_or_default(),
            "event_status" => self.status_label(),
            _ => String::new(),
        }
    }
}
