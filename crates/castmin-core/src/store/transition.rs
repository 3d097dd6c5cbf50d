// ── State transitions ──
//
// The only way state changes. `AppState::apply` is a pure function of
// the previous state and the transition (notification timestamps aside).

use chrono::{DateTime, Utc};

use super::slice::{SliceAction, SliceRecord};
use super::state::{AppState, TableRow};
use crate::model::{
    Acl, AclDetails, Event, FilterField, MetadataCatalog, ResourceId, ResourceKind, Series, Stat,
    Theme, UploadOption, UserInfo,
};
use crate::notification::Notification;
use crate::table_config::{Column, active_columns};

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    // ── Session ──────────────────────────────────────────────────────
    SetUser(Option<UserInfo>),

    // ── Resource slices ──────────────────────────────────────────────
    Themes(SliceAction<Theme>),
    Events(SliceAction<Event>),
    Series(SliceAction<Series>),
    Acls(SliceAction<Acl>),
    SetAclDetails(Option<AclDetails>),

    // ── Table filters ────────────────────────────────────────────────
    EditTextFilter(String),
    LoadFilters {
        resource: ResourceKind,
        filters: Vec<FilterField>,
    },
    SetFilterValue {
        name: String,
        value: Option<String>,
    },
    ResetFilterValues,
    SetStats(Vec<Stat>),

    // ── Table ────────────────────────────────────────────────────────
    /// Copy a slice's results into the rendered table.
    LoadTable(ResourceKind),
    /// Zero-based page index.
    SetOffset(usize),
    SetPageLimit(usize),
    SetSort {
        column: Option<String>,
        reverse: bool,
    },
    SelectRow {
        id: ResourceId,
        selected: bool,
    },
    SelectAll(bool),

    // ── Events page ──────────────────────────────────────────────────
    SetShowActions(bool),
    MetadataLoading,
    MetadataLoaded(Vec<MetadataCatalog>),
    MetadataFailed,
    UploadOptionsLoading,
    UploadOptionsLoaded(Vec<UploadOption>),
    UploadOptionsFailed,

    // ── Notifications ────────────────────────────────────────────────
    Notify(Notification),
    Dismiss(u64),
    ExpireNotifications(DateTime<Utc>),
}

impl AppState {
    /// Apply one transition.
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::SetUser(user) => self.user = user,

            Transition::Themes(action) => self.themes.apply(action),
            Transition::Events(action) => self.events.apply(action),
            Transition::Series(action) => self.series.apply(action),
            Transition::Acls(action) => self.acls.apply(action),
            Transition::SetAclDetails(details) => self.acl_details = details,

            Transition::EditTextFilter(text) => self.table_filters.text_filter = text,
            Transition::LoadFilters { resource, filters } => {
                self.table_filters.resource = Some(resource);
                self.table_filters.filters = filters;
            }
            Transition::SetFilterValue { name, value } => {
                if let Some(field) = self
                    .table_filters
                    .filters
                    .iter_mut()
                    .find(|f| f.name == name)
                {
                    field.value = value.filter(|v| !v.is_empty());
                }
            }
            Transition::ResetFilterValues => {
                self.table_filters.text_filter.clear();
                for field in &mut self.table_filters.filters {
                    field.value = None;
                }
            }
            Transition::SetStats(stats) => self.table_filters.stats = stats,

            Transition::LoadTable(kind) => self.load_table(kind),
            Transition::SetOffset(page) => self.table.pagination.offset = page,
            Transition::SetPageLimit(limit) => {
                self.table.pagination.limit = limit.max(1);
                self.table.pagination.offset = 0;
            }
            Transition::SetSort { column, reverse } => {
                self.table.sort.column = column;
                self.table.sort.reverse = reverse;
            }
            Transition::SelectRow { id, selected } => {
                if let Some(row) = self.table.rows.iter_mut().find(|r| r.id == id) {
                    row.selected = selected;
                }
            }
            Transition::SelectAll(selected) => {
                for row in &mut self.table.rows {
                    row.selected = selected;
                }
            }

            Transition::SetShowActions(show) => self.event_page.show_actions = show,
            Transition::MetadataLoading => self.event_page.fetching_metadata = true,
            Transition::MetadataLoaded(catalogs) => {
                self.event_page.metadata = catalogs;
                self.event_page.fetching_metadata = false;
            }
            Transition::MetadataFailed => self.event_page.fetching_metadata = false,
            Transition::UploadOptionsLoading => {
                self.event_page.fetching_asset_upload_options = true;
            }
            Transition::UploadOptionsLoaded(options) => {
                self.event_page.upload_options = options;
                self.event_page.fetching_asset_upload_options = false;
            }
            Transition::UploadOptionsFailed => {
                self.event_page.fetching_asset_upload_options = false;
            }

            Transition::Notify(mut notification) => {
                notification.id = self.next_notification_id;
                self.next_notification_id += 1;
                self.notifications.push(notification);
            }
            Transition::Dismiss(id) => self.notifications.retain(|n| n.id != id),
            Transition::ExpireNotifications(now) => {
                self.notifications.retain(|n| !n.is_expired(now));
            }
        }
    }

    fn load_table(&mut self, kind: ResourceKind) {
        let (rows, columns, total) = match kind {
            ResourceKind::Events => table_rows::<Event>(self),
            ResourceKind::Series => table_rows::<Series>(self),
            ResourceKind::Themes => table_rows::<Theme>(self),
            ResourceKind::Acls => table_rows::<Acl>(self),
        };

        let keep_selection = self.table.resource == Some(kind);
        let previous = std::mem::take(&mut self.table.rows);
        self.table.rows = rows
            .into_iter()
            .map(|mut row| {
                row.selected = keep_selection
                    && previous.iter().any(|p| p.id == row.id && p.selected);
                row
            })
            .collect();
        self.table.resource = Some(kind);
        self.table.columns = columns;
        self.table.pagination.total_items = total;
        self.table.multi_select = matches!(kind, ResourceKind::Events | ResourceKind::Series);
    }
}

fn table_rows<T: SliceRecord>(state: &AppState) -> (Vec<TableRow>, Vec<Column>, usize) {
    let slice = T::slice(state);
    let columns: Vec<Column> = active_columns(&slice.columns).cloned().collect();
    let rows = slice
        .results
        .iter()
        .map(|record| TableRow {
            id: record.id().clone(),
            cells: columns.iter().map(|c| record.cell(&c.name)).collect(),
            selected: false,
        })
        .collect();
    (rows, columns, slice.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;
    use crate::notification::{Severity, THEME_CREATED};
    use pretty_assertions::assert_eq;

    fn theme(id: i64, name: &str) -> Theme {
        Theme {
            id: ResourceId::Numeric(id),
            name: name.into(),
            description: None,
            creator: Some("admin".into()),
            creation_date: None,
            default: false,
            usage: None,
        }
    }

    fn loaded(themes: Vec<Theme>, total: usize) -> AppState {
        let mut state = AppState::default();
        state.apply(Transition::Themes(SliceAction::Fulfilled(Collection {
            total,
            count: themes.len(),
            offset: 0,
            limit: 10,
            results: themes,
        })));
        state
    }

    #[test]
    fn load_table_projects_active_columns() {
        let mut state = loaded(vec![theme(1, "Plain"), theme(2, "Branded")], 2);
        let mut columns = state.themes.columns.clone();
        columns[1].deactivated = true;
        state.apply(Transition::Themes(SliceAction::SetColumns(columns)));
        state.apply(Transition::LoadTable(ResourceKind::Themes));

        assert_eq!(state.table.resource, Some(ResourceKind::Themes));
        assert_eq!(state.table.columns.len(), 4);
        assert_eq!(state.table.rows[1].cells[0], "Branded");
        assert_eq!(state.table.rows[1].cells[1], "admin");
        assert!(!state.table.multi_select);
    }

    #[test]
    fn reload_keeps_selection_of_surviving_rows() {
        let mut state = loaded(vec![theme(1, "A"), theme(2, "B")], 2);
        state.apply(Transition::LoadTable(ResourceKind::Themes));
        state.apply(Transition::SelectRow {
            id: ResourceId::Numeric(2),
            selected: true,
        });
        state.apply(Transition::LoadTable(ResourceKind::Themes));
        assert!(!state.table.rows[0].selected);
        assert!(state.table.rows[1].selected);

        state.apply(Transition::LoadTable(ResourceKind::Events));
        assert!(state.table.rows.is_empty());
    }

    #[test]
    fn filter_values_set_and_reset() {
        let mut state = AppState::default();
        state.apply(Transition::LoadFilters {
            resource: ResourceKind::Events,
            filters: vec![FilterField {
                name: "status".into(),
                label: "Status".into(),
                kind: "select".into(),
                options: Vec::new(),
                value: None,
            }],
        });
        state.apply(Transition::SetFilterValue {
            name: "status".into(),
            value: Some("EVENTS.EVENTS.STATUS.PROCESSED".into()),
        });
        state.apply(Transition::EditTextFilter("lecture".into()));
        assert_eq!(
            state.table_filters.filters[0].value.as_deref(),
            Some("EVENTS.EVENTS.STATUS.PROCESSED")
        );

        state.apply(Transition::ResetFilterValues);
        assert!(state.table_filters.filters[0].value.is_none());
        assert!(state.table_filters.text_filter.is_empty());
    }

    #[test]
    fn notifications_get_sequential_ids() {
        let mut state = AppState::default();
        state.apply(Transition::Notify(Notification::new(0, Severity::Success, THEME_CREATED)));
        state.apply(Transition::Notify(Notification::new(0, Severity::Success, THEME_CREATED)));
        let ids: Vec<u64> = state.notifications.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);

        state.apply(Transition::Dismiss(1));
        assert_eq!(state.notifications.len(), 1);
    }

    #[test]
    fn page_limit_change_resets_offset() {
        let mut state = AppState::default();
        state.apply(Transition::SetOffset(3));
        state.apply(Transition::SetPageLimit(25));
        assert_eq!(state.table.pagination.offset, 0);
        assert_eq!(state.table.pagination.limit, 25);
    }
}
