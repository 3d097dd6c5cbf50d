// ── Per-resource collection state ──

use serde::{Deserialize, Serialize};

use super::{AppState, Transition};
use crate::error::SliceError;
use crate::model::{Acl, Collection, Event, ResourceKind, Series, TableRecord, Theme};
use crate::table_config::{Column, initial_columns};

/// Fetch lifecycle of a slice. Every new request restarts at `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    #[default]
    Uninitialized,
    Loading,
    Succeeded,
    Failed,
}

/// Collection state for one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState<T> {
    pub status: FetchStatus,
    pub error: Option<SliceError>,
    pub results: Vec<T>,
    pub columns: Vec<Column>,
    pub total: usize,
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T> ResourceState<T> {
    /// Empty state with the static column layout for `kind`.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            status: FetchStatus::Uninitialized,
            error: None,
            results: Vec::new(),
            columns: initial_columns(kind),
            total: 0,
            count: 0,
            offset: 0,
            limit: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Replace the collection wholesale. `count` always matches the
    /// number of results actually held.
    pub(crate) fn complete_fetch(&mut self, page: Collection<T>) {
        self.status = FetchStatus::Succeeded;
        self.error = None;
        self.count = page.results.len();
        self.results = page.results;
        self.total = page.total;
        self.offset = page.offset;
        self.limit = page.limit;
    }

    /// Record the failure. Previously loaded results stay.
    pub(crate) fn fail_fetch(&mut self, error: SliceError) {
        self.status = FetchStatus::Failed;
        self.error = Some(error);
    }

    pub(crate) fn apply(&mut self, action: SliceAction<T>) {
        match action {
            SliceAction::Pending => self.begin_fetch(),
            SliceAction::Fulfilled(page) => self.complete_fetch(page),
            SliceAction::Rejected(err) => self.fail_fetch(err),
            SliceAction::SetColumns(columns) => self.columns = columns,
        }
    }
}

/// Transitions that every resource slice understands.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T> {
    Pending,
    Fulfilled(Collection<T>),
    Rejected(SliceError),
    SetColumns(Vec<Column>),
}

/// Links a record type to its slice inside [`AppState`].
pub trait SliceRecord: TableRecord {
    const KIND: ResourceKind;

    fn slice(state: &AppState) -> &ResourceState<Self>;

    fn slice_mut(state: &mut AppState) -> &mut ResourceState<Self>;

    fn transition(action: SliceAction<Self>) -> Transition;
}

macro_rules! slice_record {
    ($ty:ty, $kind:ident, $field:ident, $variant:ident) => {
        impl SliceRecord for $ty {
            const KIND: ResourceKind = ResourceKind::$kind;

            fn slice(state: &AppState) -> &ResourceState<Self> {
                &state.$field
            }

            fn slice_mut(state: &mut AppState) -> &mut ResourceState<Self> {
                &mut state.$field
            }

            fn transition(action: SliceAction<Self>) -> Transition {
                Transition::$variant(action)
            }
        }
    };
}

slice_record!(Theme, Themes, themes, Themes);
slice_record!(Event, Events, events, Events);
slice_record!(Series, Series, series, Series);
slice_record!(Acl, Acls, acls, Acls);
