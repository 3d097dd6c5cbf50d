// ── Central state store ──
//
// One `AppState` aggregate with a typed sub-state per resource. All
// writes go through `Transition`s applied by a pure reducer; the `Store`
// handle serializes them through a `watch` channel so readers always see
// a consistent snapshot.

mod handle;
mod slice;
mod state;
mod transition;

pub use handle::Store;
pub use slice::{FetchStatus, ResourceState, SliceAction, SliceRecord};
pub use state::{
    AppState, EventPageState, SortState, TableFilterState, TablePagination, TableRow, TableState,
};
pub use transition::Transition;
