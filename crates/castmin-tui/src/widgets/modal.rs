//! Centered overlay used by every modal and the help screen.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::theme;

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Draw a bordered modal with `body` and a key hint on the last line.
pub fn render(frame: &mut Frame, area: Rect, title: &str, body: Vec<Line<'_>>, hint: &str) {
    let height = u16::try_from(body.len()).unwrap_or(u16::MAX).saturating_add(4);
    let rect = centered(area, 64, height.max(7));

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .title(Span::styled(format!(" {title} "), theme::title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(ratatui::style::Style::default().bg(theme::BG_OVERLAY));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let [body_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(body)
            .style(theme::table_row())
            .wrap(Wrap { trim: false }),
        body_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, theme::key_hint())).right_aligned()),
        hint_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered(area, 64, 10);
        assert_eq!(rect, Rect::new(18, 15, 64, 10));

        let small = Rect::new(0, 0, 30, 8);
        let rect = centered(small, 64, 10);
        assert_eq!(rect.width, 26);
        assert_eq!(rect.height, 6);
        assert_eq!(rect.x, 2);
    }
}
