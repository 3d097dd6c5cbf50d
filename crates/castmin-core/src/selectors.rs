// ── Selectors ──
//
// Pure projections from `AppState`. The TUI and page orchestrators read
// state only through these (or `Store::select` with one of them).

use crate::model::{ResourceId, ResourceKind, Stat};
use crate::notification::Notification;
use crate::store::{AppState, FetchStatus};

pub fn current_filter_resource(state: &AppState) -> Option<ResourceKind> {
    state.table_filters.resource
}

pub fn text_filter(state: &AppState) -> &str {
    &state.table_filters.text_filter
}

pub fn total_events(state: &AppState) -> usize {
    state.events.total
}

pub fn is_show_actions(state: &AppState) -> bool {
    state.event_page.show_actions
}

pub fn is_fetching_asset_upload_options(state: &AppState) -> bool {
    state.event_page.fetching_asset_upload_options
}

pub fn stats(state: &AppState) -> &[Stat] {
    &state.table_filters.stats
}

pub fn notifications(state: &AppState) -> &[Notification] {
    &state.notifications
}

/// Ids of the rows currently ticked in the table.
pub fn selected_row_ids(state: &AppState) -> Vec<ResourceId> {
    state
        .table
        .rows
        .iter()
        .filter(|r| r.selected)
        .map(|r| r.id.clone())
        .collect()
}

/// Rows on screen and the total across all pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub rows: usize,
    pub total: usize,
    /// One-based page number.
    pub page: usize,
    pub pages: usize,
}

pub fn table_summary(state: &AppState) -> TableSummary {
    let pagination = &state.table.pagination;
    TableSummary {
        rows: state.table.rows.len(),
        total: pagination.total_items,
        page: pagination.offset + 1,
        pages: pagination.page_count(),
    }
}

/// Status of the slice backing the rendered table.
pub fn table_status(state: &AppState) -> FetchStatus {
    match state.table.resource {
        Some(ResourceKind::Events) => state.events.status,
        Some(ResourceKind::Series) => state.series.status,
        Some(ResourceKind::Themes) => state.themes.status,
        Some(ResourceKind::Acls) => state.acls.status,
        None => FetchStatus::Uninitialized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Collection, Event};
    use crate::store::{SliceAction, Transition};

    fn event(n: usize) -> Event {
        Event {
            id: ResourceId::Text(format!("e-{n}")),
            title: format!("Event {n}"),
            presenters: Vec::new(),
            series_id: None,
            series_name: None,
            location: None,
            start: None,
            end: None,
            technical_start: None,
            technical_end: None,
            status: None,
            displayable_status: None,
            has_comments: false,
            has_open_comments: false,
            needs_cutting: false,
        }
    }

    #[test]
    fn summary_reflects_page_and_total() {
        let mut state = AppState::default();
        state.apply(Transition::Events(SliceAction::Fulfilled(Collection {
            total: 25,
            count: 10,
            offset: 0,
            limit: 10,
            results: (0..10).map(event).collect(),
        })));
        state.apply(Transition::LoadTable(ResourceKind::Events));

        let summary = table_summary(&state);
        assert_eq!(summary.rows, 10);
        assert_eq!(summary.total, 25);
        assert_eq!(summary.pages, 3);
        assert_eq!(total_events(&state), 25);
        assert_eq!(table_status(&state), FetchStatus::Succeeded);
    }

    #[test]
    fn selected_ids_follow_row_flags() {
        let mut state = AppState::default();
        state.apply(Transition::Events(SliceAction::Fulfilled(Collection {
            total: 3,
            count: 3,
            offset: 0,
            limit: 10,
            results: (0..3).map(event).collect(),
        })));
        state.apply(Transition::LoadTable(ResourceKind::Events));
        state.apply(Transition::SelectRow {
            id: ResourceId::Text("e-2".into()),
            selected: true,
        });

        assert_eq!(selected_row_ids(&state), vec![ResourceId::Text("e-2".into())]);
    }
}
