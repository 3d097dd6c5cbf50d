// ── Static per-resource table layouts ──
//
// The initial column set of every resource table. Slices copy these into
// their state at store init; afterwards columns change only through
// explicit `SetColumns` transitions.

use serde::{Deserialize, Serialize};

use crate::model::ResourceKind;

/// Static column definition.
#[derive(Debug, Clone, Copy)]
pub struct ColumnConfig {
    pub name: &'static str,
    pub label: &'static str,
    pub sortable: bool,
}

/// A column as held in slice and table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub sortable: bool,
    /// Hidden by the user.
    pub deactivated: bool,
}

impl From<&ColumnConfig> for Column {
    fn from(c: &ColumnConfig) -> Self {
        Self {
            name: c.name.to_owned(),
            label: c.label.to_owned(),
            sortable: c.sortable,
            deactivated: false,
        }
    }
}

const fn col(name: &'static str, label: &'static str, sortable: bool) -> ColumnConfig {
    ColumnConfig { name, label, sortable }
}

const EVENTS: &[ColumnConfig] = &[
    col("title", "Title", true),
    col("presenter", "Presenter", true),
    col("series_name", "Series", true),
    col("technical_date", "Date", true),
    col("technical_start", "Start", true),
    col("technical_end", "Stop", true),
    col("location", "Location", true),
    col("event_status", "Status", true),
];

const SERIES: &[ColumnConfig] = &[
    col("title", "Title", true),
    col("organizers", "Organizers", true),
    col("contributors", "Contributors", true),
    col("creation_date", "Created", true),
];

const THEMES: &[ColumnConfig] = &[
    col("name", "Name", true),
    col("description", "Description", true),
    col("creator", "Creator", true),
    col("creation_date", "Created", true),
    col("default", "Default", true),
];

const ACLS: &[ColumnConfig] = &[col("name", "Name", true)];

/// Static layout for a resource table.
pub fn table_config(kind: ResourceKind) -> &'static [ColumnConfig] {
    match kind {
        ResourceKind::Events => EVENTS,
        ResourceKind::Series => SERIES,
        ResourceKind::Themes => THEMES,
        ResourceKind::Acls => ACLS,
    }
}

/// Columns a freshly initialized slice starts with.
pub fn initial_columns(kind: ResourceKind) -> Vec<Column> {
    table_config(kind).iter().map(Column::from).collect()
}

/// Names of the columns still shown.
pub fn active_columns(columns: &[Column]) -> impl Iterator<Item = &Column> {
    columns.iter().filter(|c| !c.deactivated)
}
