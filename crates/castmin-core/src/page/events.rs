// ── Events / series page ──
//
// Drives the events screen: navigation tabs, stats bar, bulk-action
// dropdown, the new-event flow, and periodic reloads while mounted.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, warn};

use super::lifecycle::Lifecycle;
use crate::controller::Controller;
use crate::model::ResourceKind;
use crate::permission::{
    ROLE_UI_EVENTS_COUNTERS_VIEW, ROLE_UI_EVENTS_CREATE, ROLE_UI_EVENTS_DELETE,
    ROLE_UI_EVENTS_DETAILS_METADATA_EDIT, ROLE_UI_EVENTS_DETAILS_SCHEDULING_EDIT,
    ROLE_UI_EVENTS_VIEW, ROLE_UI_SERIES_VIEW, ROLE_UI_TASKS_CREATE, has_access, has_all,
};
use crate::pointer::{Point, PointerHub, Region};
use crate::poll::RepeatingTask;
use crate::selectors::{self, TableSummary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum EventsTab {
    #[default]
    Events,
    Series,
}

impl EventsTab {
    pub fn required_role(self) -> &'static str {
        match self {
            Self::Events => ROLE_UI_EVENTS_VIEW,
            Self::Series => ROLE_UI_SERIES_VIEW,
        }
    }

    pub fn resource(self) -> ResourceKind {
        match self {
            Self::Events => ResourceKind::Events,
            Self::Series => ResourceKind::Series,
        }
    }
}

/// Entries of the bulk-actions dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum BulkAction {
    DeleteEvents,
    StartTask,
    EditScheduledEvents,
    EditEventsMetadata,
}

impl BulkAction {
    pub fn required_roles(self) -> &'static [&'static str] {
        match self {
            Self::DeleteEvents => &[ROLE_UI_EVENTS_DELETE],
            Self::StartTask => &[ROLE_UI_TASKS_CREATE],
            Self::EditScheduledEvents => &[
                ROLE_UI_EVENTS_DETAILS_SCHEDULING_EDIT,
                ROLE_UI_EVENTS_DETAILS_METADATA_EDIT,
            ],
            Self::EditEventsMetadata => &[ROLE_UI_EVENTS_DETAILS_METADATA_EDIT],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DeleteEvents => "Delete",
            Self::StartTask => "Start task",
            Self::EditScheduledEvents => "Edit scheduled events",
            Self::EditEventsMetadata => "Edit metadata",
        }
    }

    pub fn modal(self) -> PageModal {
        match self {
            Self::DeleteEvents => PageModal::DeleteEvents,
            Self::StartTask => PageModal::StartTask,
            Self::EditScheduledEvents => PageModal::EditScheduledEvents,
            Self::EditEventsMetadata => PageModal::EditEventsMetadata,
        }
    }
}

/// The single modal the page may show at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageModal {
    NewEvent,
    DeleteEvents,
    StartTask,
    EditScheduledEvents,
    EditEventsMetadata,
}

/// Transient UI state. Reset on every (re)mount, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsPageUi {
    pub active_tab: EventsTab,
    pub action_menu_open: bool,
    pub modal: Option<PageModal>,
    /// Screen area of the bulk-actions dropdown (button and list).
    pub action_container: Option<Region>,
}

/// Cheaply cloneable handle to the events page.
#[derive(Clone)]
pub struct EventsPage {
    inner: Arc<EventsPageInner>,
}

struct EventsPageInner {
    controller: Controller,
    pointer: PointerHub,
    ui: Mutex<EventsPageUi>,
    lifecycle: Lifecycle,
}

impl EventsPage {
    pub fn new(controller: Controller, pointer: PointerHub) -> Self {
        Self {
            inner: Arc::new(EventsPageInner {
                controller,
                pointer,
                ui: Mutex::new(EventsPageUi::default()),
                lifecycle: Lifecycle::default(),
            }),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.inner.controller
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Mount (or remount) the page for `hash`.
    ///
    /// Resets UI state, clears the text filter, hides the bulk actions,
    /// and registers polling and the outside-click listener before
    /// returning. The returned future performs the initial load.
    pub fn mount(&self, hash: impl Into<String>) -> impl Future<Output = ()> + Send + 'static {
        let hash = hash.into();
        let generation = self.inner.lifecycle.begin();
        *self.ui() = EventsPageUi::default();

        let controller = &self.inner.controller;
        controller.edit_text_filter("");
        controller.set_show_actions(false);
        controller.retarget_table(ResourceKind::Events);

        let poll = self.spawn_poll();
        let listener = self.register_outside_click();
        info!(%hash, generation, "events page mounted");
        self.inner.lifecycle.attach(hash, poll, Some(listener));

        let page = self.clone();
        async move {
            let controller = &page.inner.controller;
            if controller.select(selectors::current_filter_resource) != Some(ResourceKind::Events)
            {
                if let Err(e) = controller.fetch_filters(ResourceKind::Events).await {
                    warn!(error = %e, "loading event filters failed");
                }
            }
            page.load_events_for(generation).await;
        }
    }

    /// Stop polling and remove the pointer listener.
    pub fn unmount(&self) {
        self.inner.lifecycle.end();
        debug!("events page unmounted");
    }

    /// Re-run the mount sequence when the location hash changed.
    pub fn on_hash_change(
        &self,
        hash: impl Into<String>,
    ) -> Option<impl Future<Output = ()> + Send + 'static> {
        let hash = hash.into();
        if self.inner.lifecycle.hash().as_deref() == Some(hash.as_str()) {
            return None;
        }
        Some(self.mount(hash))
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lifecycle.is_mounted()
    }

    fn spawn_poll(&self) -> RepeatingTask {
        let weak: Weak<EventsPageInner> = Arc::downgrade(&self.inner);
        RepeatingTask::spawn(self.inner.controller.poll_interval(), move || {
            let page = weak.upgrade().map(|inner| EventsPage { inner });
            async move {
                if let Some(page) = page {
                    page.reload_active_tab().await;
                }
            }
        })
    }

    fn register_outside_click(&self) -> crate::pointer::ListenerHandle {
        let weak: Weak<EventsPageInner> = Arc::downgrade(&self.inner);
        self.inner.pointer.add_listener(move |point: Point| {
            if let Some(inner) = weak.upgrade() {
                let mut ui = inner.ui.lock().unwrap_or_else(PoisonError::into_inner);
                let inside = ui.action_container.is_some_and(|r| r.contains(point));
                if ui.action_menu_open && !inside {
                    ui.action_menu_open = false;
                }
            }
        })
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load stats and events; events go into the table once they arrive.
    pub async fn load_events(&self) {
        let generation = self.inner.lifecycle.generation();
        self.load_events_for(generation).await;
    }

    async fn load_events_for(&self, generation: u64) {
        let controller = &self.inner.controller;
        let stats = async {
            if let Err(e) = controller.fetch_stats().await {
                warn!(error = %e, "loading stats failed");
            }
        };
        let events = async {
            match controller.fetch_events().await {
                Ok(_) => {
                    if self.inner.lifecycle.is_current(generation)
                        && self.active_tab() == EventsTab::Events
                    {
                        controller.load_into_table(ResourceKind::Events);
                    }
                }
                Err(e) => warn!(error = %e, "loading events failed"),
            }
        };
        tokio::join!(stats, events);
    }

    async fn load_series_for(&self, generation: u64) {
        let controller = &self.inner.controller;
        match controller.fetch_series().await {
            Ok(_) => {
                if self.inner.lifecycle.is_current(generation)
                    && self.active_tab() == EventsTab::Series
                {
                    controller.load_into_table(ResourceKind::Series);
                }
            }
            Err(e) => warn!(error = %e, "loading series failed"),
        }
    }

    /// One poll tick: refresh whatever the active tab shows.
    pub async fn reload_active_tab(&self) {
        let generation = self.inner.lifecycle.generation();
        match self.active_tab() {
            EventsTab::Events => self.load_events_for(generation).await,
            EventsTab::Series => self.load_series_for(generation).await,
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Tabs the user may open.
    pub fn nav_tabs(&self) -> Vec<EventsTab> {
        let user = self.inner.controller.select(|s| s.user.clone());
        EventsTab::iter()
            .filter(|tab| has_access(tab.required_role(), user.as_ref()))
            .collect()
    }

    pub fn active_tab(&self) -> EventsTab {
        self.ui().active_tab
    }

    /// Switch to events. The page offset is kept.
    pub async fn show_events_tab(&self) {
        self.ui().active_tab = EventsTab::Events;
        let controller = &self.inner.controller;
        if controller.select(|s| s.table.resource) != Some(ResourceKind::Events) {
            controller.clear_sort();
        }
        self.load_events().await;
    }

    /// Switch to series, starting from the first page.
    pub async fn show_series_tab(&self) {
        self.ui().active_tab = EventsTab::Series;
        let controller = &self.inner.controller;
        controller.retarget_table(ResourceKind::Series);
        controller.set_offset(0);
        controller.set_show_actions(false);
        let generation = self.inner.lifecycle.generation();
        self.load_series_for(generation).await;
    }

    pub fn show_stats(&self) -> bool {
        self.inner
            .controller
            .select(|s| has_access(ROLE_UI_EVENTS_COUNTERS_VIEW, s.user.as_ref()))
    }

    pub fn summary(&self) -> TableSummary {
        self.inner.controller.select(selectors::table_summary)
    }

    // ── Bulk actions ─────────────────────────────────────────────────

    /// Open or close the dropdown. Stays closed while no row is selected.
    pub fn toggle_action_menu(&self) {
        let enabled = self.active_tab() == EventsTab::Events
            && self.inner.controller.select(selectors::is_show_actions);
        let mut ui = self.ui();
        ui.action_menu_open = enabled && !ui.action_menu_open;
    }

    pub fn set_action_container(&self, region: Option<Region>) {
        self.ui().action_container = region;
    }

    /// Dropdown entries the user holds every role for. Empty off the
    /// events tab.
    pub fn bulk_actions(&self) -> Vec<BulkAction> {
        if self.active_tab() != EventsTab::Events {
            return Vec::new();
        }
        let user = self.inner.controller.select(|s| s.user.clone());
        BulkAction::iter()
            .filter(|action| has_all(action.required_roles(), user.as_ref()))
            .collect()
    }

    /// Open the modal for `action`. Returns false when not permitted.
    pub fn select_bulk_action(&self, action: BulkAction) -> bool {
        if !self.bulk_actions().contains(&action) {
            return false;
        }
        let mut ui = self.ui();
        ui.action_menu_open = false;
        ui.modal = Some(action.modal());
        true
    }

    /// Delete every selected event, close the modal, and reload.
    pub async fn delete_selected_events(&self) -> bool {
        let controller = &self.inner.controller;
        let (shows_events, ids) = controller.select(|s| {
            (
                s.table.resource == Some(ResourceKind::Events),
                selectors::selected_row_ids(s),
            )
        });
        self.close_modal();
        if !shows_events || ids.is_empty() {
            return false;
        }

        let deleted = controller.delete_events(&ids).await;
        if deleted {
            controller.select_all(false);
            self.load_events().await;
        }
        deleted
    }

    // ── New event ────────────────────────────────────────────────────

    pub fn can_create_event(&self) -> bool {
        self.inner
            .controller
            .select(|s| has_access(ROLE_UI_EVENTS_CREATE, s.user.as_ref()))
    }

    /// Load metadata, then upload options, then reveal the creation modal.
    pub async fn show_new_event_modal(&self) -> bool {
        if !self.can_create_event() {
            return false;
        }
        let controller = &self.inner.controller;
        if let Err(e) = controller.fetch_event_metadata().await {
            warn!(error = %e, "continuing without event metadata");
        }
        if let Err(e) = controller.fetch_asset_upload_options().await {
            warn!(error = %e, "continuing without upload options");
        }
        if !self.is_mounted() {
            return false;
        }
        self.ui().modal = Some(PageModal::NewEvent);
        true
    }

    // ── Modals ───────────────────────────────────────────────────────

    pub fn close_modal(&self) {
        self.ui().modal = None;
    }

    pub fn ui_snapshot(&self) -> EventsPageUi {
        self.ui().clone()
    }

    fn ui(&self) -> MutexGuard<'_, EventsPageUi> {
        self.inner.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for EventsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventsPage")
            .field("ui", &self.ui_snapshot())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}
