//! Theme and ACL screens: a plain table with per-row details and delete.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc::UnboundedSender;

use castmin_core::page::{ActionCell, CellControl, CellModal, RowActions};
use castmin_core::permission::{ROLE_UI_THEMES_EDIT, has_access};
use castmin_core::selectors;
use castmin_core::{AclDetails, AppState, ListPage, NewTheme, ResourceKind, Severity, ThemeDetails};

use super::common::{
    FilterPanel, PanelOutcome, Prompt, PromptOutcome, TableOutcome, apply_table_key,
    filter_summary, table_key,
};
use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::modal;
use crate::widgets::resource_table::{self, TableCursor};

/// Body of a details modal.
pub trait DetailsView {
    fn title(&self) -> String;
    fn lines(&self) -> Vec<Line<'static>>;
}

impl DetailsView for AclDetails {
    fn title(&self) -> String {
        format!("ACL · {}", self.name)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let policies = self.policies();
        if policies.is_empty() {
            return vec![Line::from(Span::styled("No policies", theme::key_hint()))];
        }
        policies
            .into_iter()
            .map(|(role, actions)| {
                Line::from(vec![
                    Span::styled(format!("{role:<32}"), theme::key_hint_key()),
                    Span::raw(actions.join(", ")),
                ])
            })
            .collect()
    }
}

impl DetailsView for ThemeDetails {
    fn title(&self) -> String {
        format!("Theme · {}", self.name)
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(self.description.clone().unwrap_or_default()),
            Line::from(format!(
                "Creator: {}{}",
                self.creator.as_deref().unwrap_or("-"),
                if self.default { " · default theme" } else { "" }
            )),
        ];
        lines.extend(self.sections().into_iter().map(|(name, active)| {
            let (mark, style) = if active {
                ("on ", theme::severity(Severity::Success))
            } else {
                ("off", theme::key_hint())
            };
            Line::from(vec![
                Span::styled(format!("{mark} "), style),
                Span::raw(name),
            ])
        }));
        lines
    }
}

enum PromptPurpose {
    TextFilter,
    NewTheme,
}

pub struct ListScreen<A: RowActions + Copy> {
    id: ScreenId,
    page: ListPage,
    actions: A,
    cursor: TableCursor,
    /// Cell of the row whose controls were last used.
    cell: Option<ActionCell<A>>,
    prompt: Option<(PromptPurpose, Prompt)>,
    filters: Option<FilterPanel>,
    action_tx: Option<UnboundedSender<Action>>,
}

impl<A> ListScreen<A>
where
    A: RowActions + Copy,
    A::Details: DetailsView,
{
    pub fn new(id: ScreenId, page: ListPage, actions: A) -> Self {
        Self {
            id,
            page,
            actions,
            cursor: TableCursor::default(),
            cell: None,
            prompt: None,
            filters: None,
            action_tx: None,
        }
    }

    fn reload(&self) {
        let page = self.page.clone();
        tokio::spawn(async move { page.reload().await });
    }

    /// Action cell for the row under the cursor.
    fn cursor_cell(&mut self, state: &AppState) -> Option<ActionCell<A>> {
        let row = state.table.rows.get(self.cursor.row)?;
        if let Some(cell) = self.cell.as_ref().filter(|c| c.row() == &row.id) {
            return Some(cell.clone());
        }
        let label = row.cells.first().cloned().unwrap_or_default();
        let cell = ActionCell::new(
            self.page.controller().clone(),
            self.actions,
            row.id.clone(),
            label,
        );
        self.cell = Some(cell.clone());
        Some(cell)
    }

    fn can_create(&self, state: &AppState) -> bool {
        self.page.kind() == ResourceKind::Themes && has_access(ROLE_UI_THEMES_EDIT, state.user.as_ref())
    }

    fn submit_prompt(&self, purpose: &PromptPurpose, text: String) {
        let controller = self.page.controller().clone();
        match purpose {
            PromptPurpose::TextFilter => {
                controller.edit_text_filter(text);
                controller.set_offset(0);
                self.reload();
            }
            PromptPurpose::NewTheme => {
                if text.is_empty() {
                    if let Some(tx) = &self.action_tx {
                        let _ = tx.send(Action::Notify(
                            Severity::Warning,
                            "A theme needs a name".into(),
                        ));
                    }
                    return;
                }
                let page = self.page.clone();
                tokio::spawn(async move {
                    let theme = NewTheme {
                        name: text,
                        ..NewTheme::default()
                    };
                    if controller.post_new_theme(&theme).await {
                        page.reload().await;
                    }
                });
            }
        }
    }

    fn handle_cell_modal(&self, cell: &ActionCell<A>, modal: &CellModal<A::Details>, key: KeyEvent) {
        match (modal, key.code) {
            (CellModal::ConfirmDelete, KeyCode::Char('y') | KeyCode::Enter) => {
                let cell = cell.clone();
                let page = self.page.clone();
                tokio::spawn(async move {
                    if cell.confirm_delete().await {
                        page.reload().await;
                    }
                });
            }
            (CellModal::ConfirmDelete, KeyCode::Esc | KeyCode::Char('n')) => cell.cancel_delete(),
            (CellModal::Details(_), KeyCode::Esc | KeyCode::Enter) => cell.hide_details(),
            _ => {}
        }
    }
}

impl<A> Component for ListScreen<A>
where
    A: RowActions + Copy,
    A::Details: DetailsView,
{
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn activate(&mut self) {
        self.cursor = TableCursor::default();
        self.cell = None;
        self.prompt = None;
        self.filters = None;
        tokio::spawn(self.page.mount(self.id.hash()));
    }

    fn deactivate(&mut self) {
        self.page.unmount();
    }

    fn captures_input(&self) -> bool {
        self.prompt.is_some()
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        if let Some((_, prompt)) = self.prompt.as_mut() {
            match prompt.handle_key(key) {
                PromptOutcome::Editing => {}
                PromptOutcome::Submitted(text) => {
                    if let Some((purpose, _)) = self.prompt.take() {
                        self.submit_prompt(&purpose, text);
                    }
                }
                PromptOutcome::Cancelled => self.prompt = None,
            }
            return Ok(None);
        }

        if let Some(panel) = self.filters.as_mut() {
            match panel.handle_key(key, self.page.controller(), state) {
                PanelOutcome::Stay => {}
                PanelOutcome::Reload => self.reload(),
                PanelOutcome::Close => self.filters = None,
            }
            return Ok(None);
        }

        if let Some(cell) = self.cell.clone() {
            if let Some(modal) = cell.modal_snapshot() {
                self.handle_cell_modal(&cell, &modal, key);
                return Ok(None);
            }
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some(cell) = self.cursor_cell(state) {
                    if cell.controls().contains(&CellControl::Details) {
                        tokio::spawn(async move {
                            cell.show_details().await;
                        });
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(cell) = self.cursor_cell(state) {
                    cell.request_delete();
                }
            }
            KeyCode::Char('c') if self.can_create(state) => {
                self.prompt = Some((PromptPurpose::NewTheme, Prompt::new("New theme name", "")));
            }
            _ => {
                if let Some(table_key) = table_key(key) {
                    match apply_table_key(self.page.controller(), state, &mut self.cursor, table_key)
                    {
                        TableOutcome::Nothing => {}
                        TableOutcome::Reload => self.reload(),
                        TableOutcome::OpenPrompt => {
                            self.prompt = Some((
                                PromptPurpose::TextFilter,
                                Prompt::new("Filter", selectors::text_filter(state)),
                            ));
                        }
                        TableOutcome::OpenFilters => self.filters = Some(FilterPanel::default()),
                    }
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [filter_area, table_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        match &self.prompt {
            Some((_, prompt)) => prompt.render(frame, filter_area),
            None => frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" Filters: ", theme::key_hint()),
                    Span::styled(filter_summary(state), theme::table_row()),
                ])),
                filter_area,
            ),
        }

        let mut cursor = self.cursor;
        cursor.clamp(state.table.rows.len(), state.table.columns.len());
        resource_table::render(frame, table_area, state, cursor, self.id.label());

        let mut hints = vec![" ↵ details  x delete"];
        if self.can_create(state) {
            hints.push("  c new");
        }
        hints.push("  / search  f filters  o sort");
        frame.render_widget(
            Paragraph::new(Span::styled(hints.concat(), theme::key_hint())),
            hint_area,
        );

        if let Some(panel) = &self.filters {
            panel.render(frame, area, state);
        }

        let Some(cell) = &self.cell else { return };
        match cell.modal_snapshot() {
            Some(CellModal::Details(details)) => {
                modal::render(frame, area, &details.title(), details.lines(), "Esc close");
            }
            Some(CellModal::ConfirmDelete) => {
                let body = vec![Line::from(format!("Delete \"{}\"?", cell.label()))];
                modal::render(frame, area, "Confirm delete", body, "y confirm · Esc cancel");
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use castmin_core::{AclEntry, ResourceId};

    use super::*;

    #[test]
    fn acl_details_list_one_line_per_role() {
        let details = AclDetails {
            id: ResourceId::Numeric(7),
            name: "Public".into(),
            organization: None,
            entries: vec![
                AclEntry {
                    role: "ROLE_ANONYMOUS".into(),
                    action: "read".into(),
                    allow: true,
                },
                AclEntry {
                    role: "ROLE_ADMIN".into(),
                    action: "write".into(),
                    allow: true,
                },
            ],
        };
        assert_eq!(details.title(), "ACL · Public");
        assert_eq!(details.lines().len(), 2);
    }
}
