// ── Domain model ──
//
// Canonical representation of every admin resource the front-end shows.
// Wire types from `castmin_api` are translated into these in `convert`.

pub mod acl;
pub mod collection;
pub mod event;
pub mod kind;
pub mod resource_id;
pub mod resources;
pub mod series;
pub mod theme;
pub mod user;

// ── Re-exports ──────────────────────────────────────────────────────

pub use acl::{Acl, AclDetails, AclEntry};
pub use collection::Collection;
pub use event::Event;
pub use kind::ResourceKind;
pub use resource_id::ResourceId;
pub use resources::{FilterField, MetadataCatalog, MetadataField, Stat, UploadOption};
pub use series::Series;
pub use theme::{Theme, ThemeDetails};
pub use user::UserInfo;

/// A record that can be shown as one row of a resource table.
pub trait TableRecord: Clone + Send + Sync + 'static {
    /// Unique id of the row.
    fn id(&self) -> &ResourceId;

    /// Display text for the named column. Unknown columns render empty.
    fn cell(&self, column: &str) -> String;
}

/// Format an optional timestamp the way table cells show dates.
pub(crate) fn format_date(value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(String::new, |dt| dt.format("%Y-%m-%d").to_string())
}

/// Format an optional timestamp as a wall-clock time.
pub(crate) fn format_time(value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(String::new, |dt| dt.format("%H:%M").to_string())
}
