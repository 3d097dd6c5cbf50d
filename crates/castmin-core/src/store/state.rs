// ── Application state aggregate ──

use serde::{Deserialize, Serialize};

use super::ResourceState;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::model::{
    Acl, AclDetails, Event, FilterField, MetadataCatalog, ResourceId, ResourceKind, Series, Stat,
    Theme, UploadOption, UserInfo,
};
use crate::notification::Notification;
use crate::table_config::Column;

/// Everything the front-end knows. Created empty at store init; slices
/// are superseded on each fetch, never destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user: Option<UserInfo>,
    pub themes: ResourceState<Theme>,
    pub events: ResourceState<Event>,
    pub series: ResourceState<Series>,
    pub acls: ResourceState<Acl>,
    pub acl_details: Option<AclDetails>,
    pub table_filters: TableFilterState,
    pub table: TableState,
    pub event_page: EventPageState,
    pub notifications: Vec<Notification>,
    pub(crate) next_notification_id: u64,
}

impl AppState {
    pub fn new(page_size: usize) -> Self {
        Self {
            user: None,
            themes: ResourceState::new(ResourceKind::Themes),
            events: ResourceState::new(ResourceKind::Events),
            series: ResourceState::new(ResourceKind::Series),
            acls: ResourceState::new(ResourceKind::Acls),
            acl_details: None,
            table_filters: TableFilterState::default(),
            table: TableState::new(page_size),
            event_page: EventPageState::default(),
            notifications: Vec::new(),
            next_notification_id: 1,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Filters of the table currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilterState {
    /// Resource whose filter definitions are loaded.
    pub resource: Option<ResourceKind>,
    pub text_filter: String,
    pub filters: Vec<FilterField>,
    pub stats: Vec<Stat>,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub id: ResourceId,
    /// Cell text, one per column in `TableState::columns`.
    pub cells: Vec<String>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePagination {
    /// Rows per page.
    pub limit: usize,
    /// Zero-based page index.
    pub offset: usize,
    pub total_items: usize,
}

impl TablePagination {
    pub fn page_count(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.total_items.div_ceil(self.limit).max(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub reverse: bool,
}

/// The generic table every list screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub resource: Option<ResourceKind>,
    pub rows: Vec<TableRow>,
    pub columns: Vec<Column>,
    pub pagination: TablePagination,
    pub sort: SortState,
    pub multi_select: bool,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            resource: None,
            rows: Vec::new(),
            columns: Vec::new(),
            pagination: TablePagination {
                limit: page_size,
                offset: 0,
                total_items: 0,
            },
            sort: SortState::default(),
            multi_select: false,
        }
    }
}

/// Data the events page loads for itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPageState {
    /// Bulk-actions affordance visible (at least one row selected).
    pub show_actions: bool,
    pub metadata: Vec<MetadataCatalog>,
    pub fetching_metadata: bool,
    pub upload_options: Vec<UploadOption>,
    pub fetching_asset_upload_options: bool,
}
