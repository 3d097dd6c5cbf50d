// ── Supporting resources: filters, stats, metadata, upload options ──

use serde::{Deserialize, Serialize};

/// A table filter definition with its currently selected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterField {
    pub name: String,
    pub label: String,
    /// Widget kind reported by the server (`select`, `period`, ...).
    pub kind: String,
    /// Selectable `(value, label)` pairs; empty for free-form filters.
    pub options: Vec<(String, String)>,
    pub value: Option<String>,
}

/// An event-status counter shown in the stats bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub description: String,
    /// `(filter name, value)` pairs that select the counted events.
    pub filters: Vec<(String, String)>,
    pub count: usize,
    pub order: i32,
}

impl Stat {
    /// Filter string that restricts a listing to this counter's events.
    pub fn filter_string(&self) -> String {
        self.filters
            .iter()
            .map(|(name, value)| format!("{name}:{value}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A field in a metadata catalog of the new-event wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataField {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub read_only: bool,
    pub required: bool,
    pub value: serde_json::Value,
}

/// A metadata catalog (e.g. `dublincore/episode`) and its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataCatalog {
    pub flavor: String,
    pub title: String,
    pub fields: Vec<MetadataField>,
}

/// An asset the new-event wizard can upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOption {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub flavor: Option<String>,
    pub accept: Option<String>,
    pub multiple: bool,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_filter_string_joins_pairs() {
        let stat = Stat {
            name: "today".into(),
            description: "Today".into(),
            filters: vec![
                ("startDate".into(), "2024-01-01".into()),
                ("status".into(), "EVENTS.EVENTS.STATUS.SCHEDULED".into()),
            ],
            count: 3,
            order: 1,
        };
        assert_eq!(
            stat.filter_string(),
            "startDate:2024-01-01,status:EVENTS.EVENTS.STATUS.SCHEDULED"
        );
    }
}
