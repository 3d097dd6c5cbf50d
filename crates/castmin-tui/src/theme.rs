//! Palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

use castmin_core::{FetchStatus, Severity};

pub const ACCENT: Color = Color::Rgb(94, 172, 255); // #5eacff
pub const HIGHLIGHT: Color = Color::Rgb(255, 184, 108); // #ffb86c
pub const SUCCESS: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const WARNING: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const ERROR: Color = Color::Rgb(255, 99, 99); // #ff6363
pub const TEXT: Color = Color::Rgb(205, 210, 222); // #cdd2de
pub const MUTED: Color = Color::Rgb(110, 120, 150); // #6e7896
pub const BG_SELECTED: Color = Color::Rgb(38, 44, 60); // #262c3c
pub const BG_OVERLAY: Color = Color::Rgb(24, 27, 36); // #181b24

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

/// Row under the cursor.
pub fn table_cursor() -> Style {
    Style::default()
        .fg(HIGHLIGHT)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

/// Row ticked for a bulk action.
pub fn table_checked() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn tab_active() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn severity(severity: Severity) -> Style {
    let color = match severity {
        Severity::Success => SUCCESS,
        Severity::Info => ACCENT,
        Severity::Warning => WARNING,
        Severity::Error => ERROR,
    };
    Style::default().fg(color)
}

/// Colour for a slice's fetch status marker.
pub fn fetch_status(status: FetchStatus) -> Style {
    match status {
        FetchStatus::Uninitialized => key_hint(),
        FetchStatus::Loading => Style::default().fg(WARNING),
        FetchStatus::Succeeded => Style::default().fg(SUCCESS),
        FetchStatus::Failed => Style::default().fg(ERROR),
    }
}
