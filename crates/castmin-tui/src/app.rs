//! Application core: event loop, screen switching, overlays.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use castmin_config::Hotkeys;
use castmin_core::{AppState, Controller, Notification, Point, PointerHub, Severity};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::{modal, toasts};

/// Key used when the configured new-event hotkey is not a single character.
const DEFAULT_NEW_EVENT_KEY: char = 'n';

/// Parse a hotkey setting; only single characters are supported.
pub fn parse_hotkey(setting: &str) -> Option<char> {
    let mut chars = setting.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_ascii_digit() => Some(c),
        _ => None,
    }
}

/// Global bindings. `captured` is true while a screen prompt owns the
/// keyboard; only Ctrl+C gets through then.
pub fn global_action(key: KeyEvent, active: ScreenId, captured: bool) -> Option<Action> {
    if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if captured {
        return None;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('?')) => Some(Action::ToggleHelp),
        (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
            let n = u8::try_from(c.to_digit(10)?).ok()?;
            ScreenId::from_number(n).map(Action::SwitchScreen)
        }
        (KeyModifiers::NONE, KeyCode::Tab) => Some(Action::SwitchScreen(active.next())),
        (KeyModifiers::SHIFT, KeyCode::BackTab) => Some(Action::SwitchScreen(active.prev())),
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => Some(Action::DismissNotification),
        _ => None,
    }
}

pub struct App {
    controller: Controller,
    pointer: PointerHub,
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Latest store snapshot; refreshed on every store change.
    state: AppState,
    /// Notifications raised by the TUI itself (bad input), shown with
    /// the store's.
    local_notifications: Vec<Notification>,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(controller: Controller, hotkeys: &Hotkeys) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let pointer = PointerHub::new();

        let new_event_key = parse_hotkey(&hotkeys.new_event).unwrap_or_else(|| {
            tracing::warn!(setting = %hotkeys.new_event, "unsupported new-event hotkey");
            DEFAULT_NEW_EVENT_KEY
        });
        let screens = create_screens(&controller, &pointer, new_event_key)
            .into_iter()
            .collect();
        let state = controller.store().snapshot();

        Self {
            controller,
            pointer,
            active_screen: ScreenId::default(),
            screens,
            state,
            local_notifications: Vec::new(),
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.activate();
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(500),
            Duration::from_millis(33),
            self.controller.store().subscribe(),
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };
            let redraw = matches!(event, Event::Render | Event::Resize);

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::StateChanged => self.action_tx.send(Action::StateChanged)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render | Event::Resize => {}
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(action);
                if !self.running {
                    break;
                }
            }
            if self.running && redraw {
                tui.draw(|frame| self.render(frame))?;
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.deactivate();
        }
        events.stop();
        tui.exit();
        self.controller.disconnect().await;
        info!("TUI event loop ended");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let captured = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.captures_input());

        if self.help_visible && !captured {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if let Some(action) = global_action(key, self.active_screen, captured) {
            return Ok(Some(action));
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key, &self.state),
            None => Ok(None),
        }
    }

    /// Every button press goes to the pointer hub first, then to the
    /// active screen.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return Ok(None);
        };
        let point = Point {
            x: mouse.column,
            y: mouse.row,
        };
        self.pointer.pointer_down(point);

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_pointer_down(point),
            None => Ok(None),
        }
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(target) => {
                if target != self.active_screen {
                    debug!(from = %self.active_screen, to = %target, "switching screen");
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.deactivate();
                    }
                    self.active_screen = target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.activate();
                    }
                }
            }

            Action::StateChanged => self.state = self.controller.store().snapshot(),

            Action::Tick => {
                let now = Utc::now();
                self.controller.expire_notifications(now);
                self.local_notifications.retain(|n| !n.is_expired(now));
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Notify(severity, message) => {
                let id = u64::try_from(self.local_notifications.len()).unwrap_or(u64::MAX);
                self.local_notifications
                    .push(Notification::new(id, severity, message));
            }

            Action::DismissNotification => {
                if self.local_notifications.pop().is_none() {
                    if let Some(latest) = self.state.notifications.last() {
                        self.controller.dismiss(latest.id);
                    }
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area, &self.state);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        let toasts: Vec<Notification> = self
            .state
            .notifications
            .iter()
            .chain(&self.local_notifications)
            .cloned()
            .collect();
        toasts::render(frame, content_area, &toasts);

        if self.help_visible {
            render_help(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        frame.render_widget(
            Tabs::new(titles)
                .divider(Span::styled(" ", theme::key_hint()))
                .select(selected),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let user = match &self.state.user {
            Some(user) => Span::styled(
                format!("● {}", user.display_name()),
                theme::severity(Severity::Success),
            ),
            None => Span::styled("○ anonymous", theme::key_hint()),
        };
        let line = Line::from(vec![
            Span::raw(" "),
            user,
            Span::styled(" │ ? help  Tab screens  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let row = |keys: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
            Span::styled(text, theme::key_hint()),
        ])
    };
    let heading = |text: &'static str| Line::from(Span::styled(text, theme::title()));

    let body = vec![
        heading("Navigation"),
        row("1-3 Tab", "Switch screen"),
        row("j/k ↑/↓", "Move cursor"),
        row("h/l ←/→", "Previous / next page"),
        row("< > o", "Pick column / sort"),
        row("v V", "Hide column / show all"),
        heading("Tables"),
        row("/", "Search"),
        row("f r", "Filters / reset filters"),
        row("↵ x c", "Details / delete / new theme"),
        heading("Events"),
        row("t", "Events / series tab"),
        row("space a", "Select row / all"),
        row("b", "Bulk actions"),
        row("n", "New event (configurable)"),
        heading("Global"),
        row("Ctrl+x", "Dismiss notification"),
        row("q", "Quit"),
    ];
    modal::render(frame, area, "Keyboard shortcuts", body, "Esc or ? to close");
}
