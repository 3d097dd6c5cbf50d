//! Events screen: events/series tabs, stats bar, bulk-action dropdown,
//! and the new-event flow.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};

use castmin_core::page::{BulkAction, EventsPageUi, EventsTab, PageModal};
use castmin_core::selectors;
use castmin_core::{AppState, EventsPage, Point, Region};

use super::common::{
    FilterPanel, PanelOutcome, Prompt, PromptOutcome, TableOutcome, apply_table_key,
    filter_summary, table_key,
};
use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;
use crate::widgets::resource_table::{self, TableCursor};
use crate::widgets::modal;

const ACTIONS_BUTTON: &str = "[ Actions ▾ ]";

pub struct EventsScreen {
    page: EventsPage,
    new_event_key: char,
    cursor: TableCursor,
    menu_cursor: usize,
    prompt: Option<Prompt>,
    filters: Option<FilterPanel>,
    /// Where the actions button was last drawn.
    actions_button: Cell<Option<Rect>>,
}

impl EventsScreen {
    pub fn new(page: EventsPage, new_event_key: char) -> Self {
        Self {
            page,
            new_event_key,
            cursor: TableCursor::default(),
            menu_cursor: 0,
            prompt: None,
            filters: None,
            actions_button: Cell::new(None),
        }
    }

    fn reload(&self) {
        let page = self.page.clone();
        tokio::spawn(async move { page.reload_active_tab().await });
    }

    fn switch_tab(&mut self) {
        let target = match self.page.active_tab() {
            EventsTab::Events => EventsTab::Series,
            EventsTab::Series => EventsTab::Events,
        };
        if !self.page.nav_tabs().contains(&target) {
            return;
        }
        self.cursor = TableCursor::default();
        let page = self.page.clone();
        tokio::spawn(async move {
            match target {
                EventsTab::Events => page.show_events_tab().await,
                EventsTab::Series => page.show_series_tab().await,
            }
        });
    }

    fn toggle_row(&self, state: &AppState) {
        if !state.table.multi_select {
            return;
        }
        if let Some(row) = state.table.rows.get(self.cursor.row) {
            self.page
                .controller()
                .select_row(row.id.clone(), !row.selected);
        }
    }

    fn toggle_all(&self, state: &AppState) {
        if !state.table.multi_select {
            return;
        }
        let all = !state.table.rows.is_empty() && state.table.rows.iter().all(|r| r.selected);
        self.page.controller().select_all(!all);
    }

    fn handle_modal_key(&self, modal: PageModal, key: KeyEvent) {
        match (modal, key.code) {
            (PageModal::DeleteEvents, KeyCode::Char('y') | KeyCode::Enter) => {
                let page = self.page.clone();
                tokio::spawn(async move {
                    page.delete_selected_events().await;
                });
            }
            (_, KeyCode::Esc | KeyCode::Char('n')) => self.page.close_modal(),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let actions = self.page.bulk_actions();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.menu_cursor + 1 < actions.len() {
                    self.menu_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(&action) = actions.get(self.menu_cursor) {
                    self.page.select_bulk_action(action);
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => self.page.toggle_action_menu(),
            _ => {}
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_nav(&self, frame: &mut Frame, area: Rect, state: &AppState, ui: &EventsPageUi) {
        let mut spans = Vec::new();
        for tab in self.page.nav_tabs() {
            let style = if tab == ui.active_tab {
                theme::tab_active()
            } else {
                theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {tab} "), style));
        }
        if self.page.show_stats() {
            spans.push(Span::styled(" │ All ", theme::key_hint()));
            spans.push(Span::styled(
                selectors::total_events(state).to_string(),
                theme::key_hint_key(),
            ));
            for stat in selectors::stats(state) {
                let name = if stat.description.is_empty() {
                    &stat.name
                } else {
                    &stat.description
                };
                spans.push(Span::styled(format!(" {name} "), theme::key_hint()));
                spans.push(Span::styled(stat.count.to_string(), theme::key_hint_key()));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let button_width = u16::try_from(ACTIONS_BUTTON.chars().count()).unwrap_or(u16::MAX);
        let [filters_area, button_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(button_width)])
                .areas(area);

        if let Some(prompt) = &self.prompt {
            prompt.render(frame, filters_area);
        } else {
            let line = Line::from(vec![
                Span::styled(" Filters: ", theme::key_hint()),
                Span::styled(filter_summary(state), theme::table_row()),
            ]);
            frame.render_widget(Paragraph::new(line), filters_area);
        }

        if selectors::is_show_actions(state) {
            frame.render_widget(
                Paragraph::new(Span::styled(ACTIONS_BUTTON, theme::key_hint_key())),
                button_area,
            );
            self.actions_button.set(Some(button_area));
        } else {
            self.actions_button.set(None);
        }
    }

    /// Dropdown under the button. Registers button plus list as the
    /// container outside of which a click closes the menu.
    fn render_menu(&self, frame: &mut Frame, area: Rect, ui: &EventsPageUi) {
        let Some(button) = self.actions_button.get() else {
            self.page.set_action_container(None);
            return;
        };
        if !ui.action_menu_open {
            self.page.set_action_container(Some(region(button)));
            return;
        }

        let actions = self.page.bulk_actions();
        let width = 26u16.min(area.width);
        let height = u16::try_from(actions.len().max(1) + 2).unwrap_or(u16::MAX);
        let x = (button.x + button.width).saturating_sub(width).max(area.x);
        let menu = Rect::new(x, button.y + 1, width, height.min(area.height));

        let items: Vec<ListItem> = if actions.is_empty() {
            vec![ListItem::new(Span::styled(" no actions permitted", theme::key_hint()))]
        } else {
            actions
                .iter()
                .enumerate()
                .map(|(idx, action)| {
                    let style = if idx == self.menu_cursor {
                        theme::table_cursor()
                    } else {
                        theme::table_row()
                    };
                    ListItem::new(Span::styled(format!(" {}", action.label()), style))
                })
                .collect()
        };

        frame.render_widget(Clear, menu);
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_focused()),
            ),
            menu,
        );
        self.page
            .set_action_container(Some(region(button.union(menu))));
    }

    fn render_modal(&self, frame: &mut Frame, area: Rect, state: &AppState, modal: PageModal) {
        let selected = selectors::selected_row_ids(state).len();
        match modal {
            PageModal::NewEvent => {
                let page_state = &state.event_page;
                let mut body = vec![Line::from(Span::styled(
                    "Metadata catalogs",
                    theme::key_hint_key(),
                ))];
                body.extend(page_state.metadata.iter().map(|catalog| {
                    Line::from(format!("  {} ({} fields)", catalog.title, catalog.fields.len()))
                }));
                body.push(Line::from(Span::styled("Upload assets", theme::key_hint_key())));
                body.extend(
                    page_state
                        .upload_options
                        .iter()
                        .map(|option| Line::from(format!("  {} [{}]", option.title, option.kind))),
                );
                modal::render(frame, area, "New event", body, "Esc close");
            }
            PageModal::DeleteEvents => {
                let body = vec![Line::from(format!(
                    "Delete {selected} selected event(s)? This cannot be undone."
                ))];
                modal::render(frame, area, "Delete events", body, "y confirm · Esc cancel");
            }
            other => {
                let title = match other {
                    PageModal::StartTask => BulkAction::StartTask.label(),
                    PageModal::EditScheduledEvents => BulkAction::EditScheduledEvents.label(),
                    _ => BulkAction::EditEventsMetadata.label(),
                };
                let body = vec![Line::from(format!("{selected} event(s) selected"))];
                modal::render(frame, area, title, body, "Esc close");
            }
        }
    }
}

fn region(rect: Rect) -> Region {
    Region {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
    }
}

impl Component for EventsScreen {
    fn activate(&mut self) {
        self.cursor = TableCursor::default();
        self.menu_cursor = 0;
        self.prompt = None;
        self.filters = None;
        tokio::spawn(self.page.mount(ScreenId::Events.hash()));
    }

    fn deactivate(&mut self) {
        self.page.unmount();
    }

    fn captures_input(&self) -> bool {
        self.prompt.is_some()
    }

    fn handle_key_event(&mut self, key: KeyEvent, state: &AppState) -> Result<Option<Action>> {
        let controller = self.page.controller().clone();

        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_key(key) {
                PromptOutcome::Editing => {}
                PromptOutcome::Submitted(text) => {
                    self.prompt = None;
                    controller.edit_text_filter(text);
                    controller.set_offset(0);
                    self.reload();
                }
                PromptOutcome::Cancelled => self.prompt = None,
            }
            return Ok(None);
        }

        if let Some(panel) = self.filters.as_mut() {
            match panel.handle_key(key, &controller, state) {
                PanelOutcome::Stay => {}
                PanelOutcome::Reload => self.reload(),
                PanelOutcome::Close => self.filters = None,
            }
            return Ok(None);
        }

        let ui = self.page.ui_snapshot();
        if let Some(modal) = ui.modal {
            self.handle_modal_key(modal, key);
            return Ok(None);
        }
        if ui.action_menu_open {
            self.handle_menu_key(key);
            return Ok(None);
        }

        match key.code {
            KeyCode::Char(c) if c == self.new_event_key => {
                if self.page.can_create_event() {
                    let page = self.page.clone();
                    tokio::spawn(async move {
                        page.show_new_event_modal().await;
                    });
                }
            }
            KeyCode::Char(' ') => self.toggle_row(state),
            KeyCode::Char('a') => self.toggle_all(state),
            KeyCode::Char('b') => {
                self.menu_cursor = 0;
                self.page.toggle_action_menu();
            }
            KeyCode::Char('t') => self.switch_tab(),
            _ => {
                if let Some(table_key) = table_key(key) {
                    match apply_table_key(&controller, state, &mut self.cursor, table_key) {
                        TableOutcome::Nothing => {}
                        TableOutcome::Reload => self.reload(),
                        TableOutcome::OpenPrompt => {
                            self.prompt = Some(Prompt::new(
                                "Filter",
                                selectors::text_filter(state),
                            ));
                        }
                        TableOutcome::OpenFilters => self.filters = Some(FilterPanel::default()),
                    }
                }
            }
        }
        Ok(None)
    }

    fn handle_pointer_down(&mut self, point: Point) -> Result<Option<Action>> {
        if self
            .actions_button
            .get()
            .is_some_and(|button| region(button).contains(point))
        {
            self.menu_cursor = 0;
            self.page.toggle_action_menu();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let ui = self.page.ui_snapshot();
        let [nav_area, filter_area, table_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        self.render_nav(frame, nav_area, state, &ui);
        self.render_filter_bar(frame, filter_area, state);

        let mut cursor = self.cursor;
        cursor.clamp(state.table.rows.len(), state.table.columns.len());
        resource_table::render(frame, table_area, state, cursor, &ui.active_tab.to_string());

        self.render_menu(frame, area, &ui);
        if let Some(panel) = &self.filters {
            panel.render(frame, area, state);
        }
        if let Some(modal) = ui.modal {
            self.render_modal(frame, area, state, modal);
        }
    }
}
