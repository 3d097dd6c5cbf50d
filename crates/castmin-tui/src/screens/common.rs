//! Key handling shared by every table screen: cursor, paging, sorting,
//! the free-text prompt and the filter panel.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
};

use castmin_core::{AppState, Controller, FilterField};

use crate::theme;
use crate::widgets::modal;
use crate::widgets::resource_table::TableCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKey {
    Up,
    Down,
    PrevPage,
    NextPage,
    PrevColumn,
    NextColumn,
    Sort,
    HideColumn,
    ShowColumns,
    EditFilter,
    OpenFilters,
    ResetFilters,
}

pub fn table_key(key: KeyEvent) -> Option<TableKey> {
    let mapped = match key.code {
        KeyCode::Char('j') | KeyCode::Down => TableKey::Down,
        KeyCode::Char('k') | KeyCode::Up => TableKey::Up,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => TableKey::PrevPage,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => TableKey::NextPage,
        KeyCode::Char('<') => TableKey::PrevColumn,
        KeyCode::Char('>') => TableKey::NextColumn,
        KeyCode::Char('o') => TableKey::Sort,
        KeyCode::Char('v') => TableKey::HideColumn,
        KeyCode::Char('V') => TableKey::ShowColumns,
        KeyCode::Char('/') => TableKey::EditFilter,
        KeyCode::Char('f') => TableKey::OpenFilters,
        KeyCode::Char('r') => TableKey::ResetFilters,
        _ => return None,
    };
    Some(mapped)
}

/// What the screen has to do after a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOutcome {
    Nothing,
    /// Paging, sorting or filters changed; fetch again.
    Reload,
    OpenPrompt,
    OpenFilters,
}

pub fn apply_table_key(
    controller: &Controller,
    state: &AppState,
    cursor: &mut TableCursor,
    key: TableKey,
) -> TableOutcome {
    let table = &state.table;
    match key {
        TableKey::Down => cursor.down(table.rows.len()),
        TableKey::Up => cursor.up(),
        TableKey::PrevColumn => cursor.prev_column(table.columns.len()),
        TableKey::NextColumn => cursor.next_column(table.columns.len()),
        TableKey::PrevPage => {
            let page = table.pagination.offset;
            if page > 0 {
                controller.goto_page(page - 1);
                cursor.row = 0;
                return TableOutcome::Reload;
            }
        }
        TableKey::NextPage => {
            let page = table.pagination.offset + 1;
            if page < table.pagination.page_count() {
                controller.goto_page(page);
                cursor.row = 0;
                return TableOutcome::Reload;
            }
        }
        TableKey::Sort => {
            if let Some(column) = table.columns.get(cursor.column).filter(|c| c.sortable) {
                controller.sort_by(&column.name);
                return TableOutcome::Reload;
            }
        }
        TableKey::HideColumn => {
            // the last visible column stays
            let column = table.columns.get(cursor.column).filter(|_| table.columns.len() > 1);
            if let (Some(kind), Some(column)) = (table.resource, column) {
                controller.toggle_column(kind, &column.name);
                cursor.clamp(table.rows.len(), table.columns.len() - 1);
            }
        }
        TableKey::ShowColumns => {
            if let Some(kind) = table.resource {
                controller.show_all_columns(kind);
            }
        }
        TableKey::ResetFilters => {
            controller.reset_filters();
            return TableOutcome::Reload;
        }
        TableKey::EditFilter => return TableOutcome::OpenPrompt,
        TableKey::OpenFilters => return TableOutcome::OpenFilters,
    }
    TableOutcome::Nothing
}

// ── Text prompt ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Editing,
    Submitted(String),
    Cancelled,
}

/// Single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: &'static str,
    pub value: String,
}

impl Prompt {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Enter => PromptOutcome::Submitted(self.value.trim().to_owned()),
            KeyCode::Esc => PromptOutcome::Cancelled,
            KeyCode::Backspace => {
                self.value.pop();
                PromptOutcome::Editing
            }
            KeyCode::Char(c) => {
                self.value.push(c);
                PromptOutcome::Editing
            }
            _ => PromptOutcome::Editing,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(format!(" {}: ", self.label), theme::key_hint_key()),
            Span::styled(format!("{}▏", self.value), theme::table_row()),
        ]);
        frame.render_widget(ratatui::widgets::Paragraph::new(line), area);
    }
}

// ── Filter panel ────────────────────────────────────────────────────

/// The option after `field`'s current value. Cycling runs through
/// "unset" between the last and the first option.
pub fn cycle_option(field: &FilterField, forward: bool) -> Option<String> {
    let values: Vec<&str> = field.options.iter().map(|(v, _)| v.as_str()).collect();
    if values.is_empty() {
        return None;
    }
    let current = field
        .value
        .as_deref()
        .and_then(|v| values.iter().position(|o| *o == v));
    let next = match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(values.len() - 1),
        (Some(i), true) if i + 1 < values.len() => Some(i + 1),
        (Some(i), false) if i > 0 => Some(i - 1),
        (Some(_), _) => None,
    };
    next.and_then(|i| values.get(i)).map(|v| (*v).to_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Stay,
    Reload,
    Close,
}

/// Overlay listing the loaded filter definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPanel {
    cursor: usize,
}

impl FilterPanel {
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &Controller,
        state: &AppState,
    ) -> PanelOutcome {
        let filters = &state.table_filters.filters;
        match key.code {
            KeyCode::Esc | KeyCode::Char('f') => PanelOutcome::Close,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.cursor + 1 < filters.len() {
                    self.cursor += 1;
                }
                PanelOutcome::Stay
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                PanelOutcome::Stay
            }
            KeyCode::Char('h' | 'l') | KeyCode::Left | KeyCode::Right => {
                let forward = matches!(key.code, KeyCode::Char('l') | KeyCode::Right);
                match filters.get(self.cursor) {
                    Some(field) => {
                        controller.set_filter_value(&field.name, cycle_option(field, forward));
                        PanelOutcome::Reload
                    }
                    None => PanelOutcome::Stay,
                }
            }
            KeyCode::Backspace | KeyCode::Delete => match filters.get(self.cursor) {
                Some(field) if field.value.is_some() => {
                    controller.set_filter_value(&field.name, None);
                    PanelOutcome::Reload
                }
                _ => PanelOutcome::Stay,
            },
            _ => PanelOutcome::Stay,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let filters = &state.table_filters.filters;
        let body: Vec<Line> = if filters.is_empty() {
            vec![Line::from(Span::styled("No filters available", theme::key_hint()))]
        } else {
            filters
                .iter()
                .enumerate()
                .map(|(idx, field)| {
                    let style = if idx == self.cursor {
                        theme::table_cursor()
                    } else {
                        theme::table_row()
                    };
                    Line::from(Span::styled(
                        format!(" {:<24} {}", field.label, value_label(field)),
                        style,
                    ))
                })
                .collect()
        };
        modal::render(frame, area, "Filters", body, "←/→ change · ⌫ clear · Esc close");
    }
}

fn value_label(field: &FilterField) -> &str {
    match &field.value {
        Some(value) => field
            .options
            .iter()
            .find(|(v, _)| v == value)
            .map_or(value.as_str(), |(_, label)| label.as_str()),
        None => "any",
    }
}

/// "text · Status=Finished · Series=Lectures"
pub fn filter_summary(state: &AppState) -> String {
    let filters = &state.table_filters;
    let mut parts = Vec::new();
    if !filters.text_filter.is_empty() {
        parts.push(format!("\"{}\"", filters.text_filter));
    }
    parts.extend(
        filters
            .filters
            .iter()
            .filter(|f| f.value.is_some())
            .map(|f| format!("{}={}", f.label, value_label(f))),
    );
    if parts.is_empty() {
        "no filters".into()
    } else {
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn status_field(value: Option<&str>) -> FilterField {
        FilterField {
            name: "status".into(),
            label: "Status".into(),
            kind: "select".into(),
            options: vec![
                ("EVENTS.EVENTS.STATUS.PROCESSED".into(), "Finished".into()),
                ("EVENTS.EVENTS.STATUS.SCHEDULED".into(), "Scheduled".into()),
            ],
            value: value.map(Into::into),
        }
    }

    #[test]
    fn vim_and_arrow_keys_map_alike() {
        assert_eq!(table_key(key(KeyCode::Char('j'))), Some(TableKey::Down));
        assert_eq!(table_key(key(KeyCode::Down)), Some(TableKey::Down));
        assert_eq!(table_key(key(KeyCode::PageDown)), Some(TableKey::NextPage));
        assert_eq!(table_key(key(KeyCode::Char('/'))), Some(TableKey::EditFilter));
        assert_eq!(table_key(key(KeyCode::Char('v'))), Some(TableKey::HideColumn));
        assert_eq!(table_key(key(KeyCode::Char('V'))), Some(TableKey::ShowColumns));
        assert_eq!(table_key(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn prompt_edits_and_submits_trimmed() {
        let mut prompt = Prompt::new("Filter", "lec");
        assert_eq!(prompt.handle_key(key(KeyCode::Char('t'))), PromptOutcome::Editing);
        assert_eq!(prompt.handle_key(key(KeyCode::Char(' '))), PromptOutcome::Editing);
        assert_eq!(prompt.handle_key(key(KeyCode::Backspace)), PromptOutcome::Editing);
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Submitted("lect".into())
        );
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptOutcome::Cancelled);
    }

    #[test]
    fn options_cycle_through_unset() {
        let processed = "EVENTS.EVENTS.STATUS.PROCESSED";
        let scheduled = "EVENTS.EVENTS.STATUS.SCHEDULED";
        assert_eq!(cycle_option(&status_field(None), true).as_deref(), Some(processed));
        assert_eq!(
            cycle_option(&status_field(Some(processed)), true).as_deref(),
            Some(scheduled)
        );
        assert_eq!(cycle_option(&status_field(Some(scheduled)), true), None);
        assert_eq!(cycle_option(&status_field(None), false).as_deref(), Some(scheduled));
        assert_eq!(cycle_option(&status_field(Some(processed)), false), None);
    }

    #[test]
    fn summary_lists_text_and_set_filters() {
        let mut state = AppState::default();
        assert_eq!(filter_summary(&state), "no filters");

        state.table_filters.text_filter = "math".into();
        state.table_filters.filters = vec![status_field(Some("EVENTS.EVENTS.STATUS.PROCESSED"))];
        assert_eq!(filter_summary(&state), "\"math\" · Status=Finished");
    }
}
