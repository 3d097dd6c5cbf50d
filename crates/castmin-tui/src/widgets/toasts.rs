//! Notification toasts, stacked in the top-right corner.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use castmin_core::{Notification, Severity};

use crate::theme;

const MAX_VISIBLE: usize = 4;
const WIDTH: u16 = 48;

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Info => "i",
        Severity::Warning => "!",
        Severity::Error => "✗",
    }
}

/// One-line toast text: message plus context, if any.
pub fn toast_text(notification: &Notification) -> String {
    match &notification.context {
        Some(context) => format!("{} {}: {context}", icon(notification.severity), notification.message()),
        None => format!("{} {}", icon(notification.severity), notification.message()),
    }
}

/// Newest last in the store; newest on top on screen.
pub fn render(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    let width = WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);

    for (slot, notification) in notifications.iter().rev().take(MAX_VISIBLE).enumerate() {
        let offset = u16::try_from(slot).unwrap_or(u16::MAX).saturating_mul(3);
        if offset + 3 > area.height {
            break;
        }
        let rect = Rect::new(x, area.y + offset, width, 3);
        let style = theme::severity(notification.severity);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(toast_text(notification), style))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .style(ratatui::style::Style::default().bg(theme::BG_OVERLAY)),
            ),
            rect,
        );
    }
}
