//! The generic resource table every list screen renders.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState as ViewState},
};

use castmin_core::selectors::{self, TableSummary};
use castmin_core::store::SortState;
use castmin_core::{AppState, Column, FetchStatus, ResourceKind};

use crate::theme;

/// Cursor positions a screen keeps for its table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCursor {
    pub row: usize,
    /// Column the sort key cycles through.
    pub column: usize,
}

impl TableCursor {
    pub fn down(&mut self, rows: usize) {
        if rows > 0 {
            self.row = (self.row + 1).min(rows - 1);
        }
    }

    pub fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn next_column(&mut self, columns: usize) {
        if columns > 0 {
            self.column = (self.column + 1) % columns;
        }
    }

    pub fn prev_column(&mut self, columns: usize) {
        if columns > 0 {
            self.column = (self.column + columns - 1) % columns;
        }
    }

    /// Keep the cursor inside a table that may have shrunk.
    pub fn clamp(&mut self, rows: usize, columns: usize) {
        self.row = self.row.min(rows.saturating_sub(1));
        self.column = self.column.min(columns.saturating_sub(1));
    }
}

/// Column header text with a sort arrow when the table is sorted by it.
pub fn header_label(column: &Column, sort: &SortState) -> String {
    match sort.column.as_deref() {
        Some(name) if name == column.name => {
            let arrow = if sort.reverse { '▼' } else { '▲' };
            format!("{} {arrow}", column.label)
        }
        _ => column.label.clone(),
    }
}

/// "3 of 25 rows · page 1/3"
pub fn summary_text(summary: TableSummary) -> String {
    format!(
        "{} of {} rows · page {}/{}",
        summary.rows, summary.total, summary.page, summary.pages
    )
}

fn status_marker(state: &AppState) -> Option<Span<'static>> {
    let status = selectors::table_status(state);
    let text = match status {
        FetchStatus::Loading => " loading… ".to_owned(),
        FetchStatus::Failed => {
            let message = table_error(state).unwrap_or_else(|| "request failed".into());
            format!(" {message} ")
        }
        FetchStatus::Uninitialized | FetchStatus::Succeeded => return None,
    };
    Some(Span::styled(text, theme::fetch_status(status)))
}

fn table_error(state: &AppState) -> Option<String> {
    let error = match state.table.resource? {
        ResourceKind::Events => state.events.error.as_ref(),
        ResourceKind::Series => state.series.error.as_ref(),
        ResourceKind::Themes => state.themes.error.as_ref(),
        ResourceKind::Acls => state.acls.error.as_ref(),
    };
    error.map(ToString::to_string)
}

/// Render the store's table. Ticked rows get a check column when the
/// table allows multi-select.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState, cursor: TableCursor, title: &str) {
    let table = &state.table;

    let mut header_cells = Vec::with_capacity(table.columns.len() + 1);
    let mut widths = Vec::with_capacity(table.columns.len() + 1);
    if table.multi_select {
        header_cells.push(Cell::from(""));
        widths.push(Constraint::Length(3));
    }
    for (idx, column) in table.columns.iter().enumerate() {
        let style = if idx == cursor.column && column.sortable {
            theme::tab_active()
        } else {
            theme::table_header()
        };
        header_cells.push(Cell::from(header_label(column, &table.sort)).style(style));
        widths.push(Constraint::Fill(1));
    }

    let rows = table.rows.iter().map(|row| {
        let mut cells = Vec::with_capacity(row.cells.len() + 1);
        if table.multi_select {
            cells.push(Cell::from(if row.selected { "[x]" } else { "[ ]" }));
        }
        cells.extend(row.cells.iter().map(|c| Cell::from(c.as_str())));
        let style = if row.selected {
            theme::table_checked()
        } else {
            theme::table_row()
        };
        Row::new(cells).style(style)
    });

    let mut block = Block::default()
        .title(Line::from(vec![Span::styled(
            format!(" {title} "),
            theme::title(),
        )]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused());
    if let Some(marker) = status_marker(state) {
        block = block.title_bottom(Line::from(marker).right_aligned());
    }
    block = block.title_bottom(Line::from(Span::styled(
        format!(" {} ", summary_text(selectors::table_summary(state))),
        theme::key_hint(),
    )));

    let widget = Table::new(rows, widths)
        .header(Row::new(header_cells))
        .block(block)
        .row_highlight_style(theme::table_cursor());

    let mut view = ViewState::default();
    if !table.rows.is_empty() {
        view.select(Some(cursor.row.min(table.rows.len() - 1)));
    }
    frame.render_stateful_widget(widget, area, &mut view);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn column(name: &str, label: &str) -> Column {
        Column {
            name: name.into(),
            label: label.into(),
            sortable: true,
            deactivated: false,
        }
    }

    #[test]
    fn sorted_column_shows_direction() {
        let title = column("title", "Title");
        let mut sort = SortState::default();
        assert_eq!(header_label(&title, &sort), "Title");

        sort.column = Some("title".into());
        assert_eq!(header_label(&title, &sort), "Title ▲");
        sort.reverse = true;
        assert_eq!(header_label(&title, &sort), "Title ▼");
        assert_eq!(header_label(&column("location", "Location"), &sort), "Location");
    }

    #[test]
    fn summary_reads_rows_and_pages() {
        let summary = TableSummary {
            rows: 10,
            total: 25,
            page: 1,
            pages: 3,
        };
        assert_eq!(summary_text(summary), "10 of 25 rows · page 1/3");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cursor = TableCursor::default();
        cursor.up();
        assert_eq!(cursor.row, 0);
        cursor.down(2);
        cursor.down(2);
        assert_eq!(cursor.row, 1);
        cursor.clamp(0, 3);
        assert_eq!(cursor.row, 0);

        cursor.prev_column(3);
        assert_eq!(cursor.column, 2);
        cursor.next_column(3);
        assert_eq!(cursor.column, 0);
    }
}
