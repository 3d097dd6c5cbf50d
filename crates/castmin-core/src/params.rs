// ── List query parameters ──
//
// Derives the `limit/offset/filter/sort` query of a list request from
// the current table filter, pagination and sort state.

use castmin_api::ListParams;

use crate::store::AppState;

/// Comma-joined `name:value` filter string, text filter first.
///
/// `None` when no filter has a value and the text filter is empty.
pub fn filter_string(state: &AppState) -> Option<String> {
    let filters = &state.table_filters;
    let mut parts = Vec::new();

    let text = filters.text_filter.trim();
    if !text.is_empty() {
        parts.push(format!("textFilter:{text}"));
    }
    parts.extend(
        filters
            .filters
            .iter()
            .filter_map(|f| f.value.as_ref().map(|v| format!("{}:{v}", f.name))),
    );

    (!parts.is_empty()).then(|| parts.join(","))
}

/// `column:ASC` or `column:DESC` for the current sort, if any.
pub fn sort_string(state: &AppState) -> Option<String> {
    let sort = &state.table.sort;
    sort.column.as_ref().map(|column| {
        let direction = if sort.reverse { "DESC" } else { "ASC" };
        format!("{column}:{direction}")
    })
}

/// Query parameters for the next list request.
///
/// The table keeps a zero-based page index; the server wants an item
/// offset.
pub fn list_params(state: &AppState) -> ListParams {
    let pagination = &state.table.pagination;
    ListParams {
        limit: pagination.limit,
        offset: pagination.offset.saturating_mul(pagination.limit),
        filter: filter_string(state),
        sort: sort_string(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterField, ResourceKind};
    use crate::store::Transition;
    use pretty_assertions::assert_eq;

    fn field(name: &str, value: Option<&str>) -> FilterField {
        FilterField {
            name: name.into(),
            label: name.into(),
            kind: "select".into(),
            options: Vec::new(),
            value: value.map(Into::into),
        }
    }

    #[test]
    fn defaults_have_no_filter_or_sort() {
        let state = AppState::default();
        assert_eq!(
            list_params(&state),
            ListParams {
                limit: 10,
                offset: 0,
                filter: None,
                sort: None,
            }
        );
    }

    #[test]
    fn text_filter_comes_first() {
        let mut state = AppState::default();
        state.apply(Transition::LoadFilters {
            resource: ResourceKind::Events,
            filters: vec![
                field("status", Some("EVENTS.EVENTS.STATUS.PROCESSED")),
                field("location", None),
                field("series", Some("s-1")),
            ],
        });
        state.apply(Transition::EditTextFilter("  intro ".into()));

        assert_eq!(
            filter_string(&state).as_deref(),
            Some("textFilter:intro,status:EVENTS.EVENTS.STATUS.PROCESSED,series:s-1")
        );
    }

    #[test]
    fn page_index_becomes_item_offset() {
        let mut state = AppState::default();
        state.apply(Transition::SetOffset(2));
        state.apply(Transition::SetSort {
            column: Some("title".into()),
            reverse: true,
        });

        let params = list_params(&state);
        assert_eq!(params.offset, 20);
        assert_eq!(params.sort.as_deref(), Some("title:DESC"));
    }
}
