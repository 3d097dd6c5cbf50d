//! UI actions. Screens and the event loop communicate only through these;
//! data changes arrive from the store, not as actions.

use castmin_core::Severity;

use crate::screen::ScreenId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Store ─────────────────────────────────────────────────────
    /// The store published a new state.
    StateChanged,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    /// Local feedback that never reached the controller (bad input).
    Notify(Severity, String),
    DismissNotification,
}
