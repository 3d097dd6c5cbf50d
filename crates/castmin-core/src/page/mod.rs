// ── Page orchestrators ──
//
// Pages compose slices, selectors and transient UI state for one screen.
// Each mount owns its poller and pointer listener; remounting or
// unmounting drops both.

mod action_cell;
mod events;
mod lifecycle;
mod list;

pub use action_cell::{
    AclRowActions, ActionCell, ActionCellConfig, CellControl, CellModal, RowActions,
    ThemeRowActions,
};
pub use events::{BulkAction, EventsPage, EventsPageUi, EventsTab, PageModal};
pub use list::ListPage;
