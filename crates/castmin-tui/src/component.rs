//! Component trait implemented by every screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use castmin_core::{AppState, Point};

use crate::action::Action;

/// Lifecycle: `init` once, then `activate` / `deactivate` around each
/// visit, with key, pointer and render calls in between.
pub trait Component: Send {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// The screen became visible; mount its page.
    fn activate(&mut self) {}

    /// The screen was left; unmount its page.
    fn deactivate(&mut self) {}

    /// True while a text prompt owns the keyboard.
    fn captures_input(&self) -> bool {
        false
    }

    fn handle_key_event(&mut self, _key: KeyEvent, _state: &AppState) -> Result<Option<Action>> {
        Ok(None)
    }

    /// A mouse button went down at `point` (already forwarded to the
    /// pointer hub).
    fn handle_pointer_down(&mut self, _point: Point) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);
}
