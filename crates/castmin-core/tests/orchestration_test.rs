// Orchestration tests for castmin-core against a recording fake backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

use castmin_core::page::{
    AclRowActions, ActionCell, BulkAction, CellControl, CellModal, EventsTab, PageModal,
    ThemeRowActions,
};
use castmin_core::permission::{
    ROLE_UI_ACLS_DELETE, ROLE_UI_ACLS_EDIT, ROLE_UI_EVENTS_CREATE, ROLE_UI_EVENTS_DELETE,
    ROLE_UI_EVENTS_DETAILS_METADATA_EDIT, ROLE_UI_EVENTS_VIEW, ROLE_UI_SERIES_VIEW,
    ROLE_UI_THEMES_EDIT,
};
use castmin_core::{
    AclDetails, AclEntry, AdminBackend, Collection, Controller, CoreError, Event, EventsPage,
    FetchStatus, FilterField, ListPage, ListParams, MetadataCatalog, NewTheme, Point, PointerHub,
    Region, ResourceId, ResourceKind, Series, Stat, Theme, ThemeDetails, UploadOption, UserInfo,
};
use castmin_core::{Acl, selectors};

// ── Recording backend ───────────────────────────────────────────────

#[derive(Default)]
struct RecordingBackend {
    roles: Vec<&'static str>,
    calls: Mutex<Vec<String>>,
    params: Mutex<Vec<(String, ListParams)>>,
    events_total: usize,
    event_count: usize,
    fail_events: AtomicBool,
    fail_writes: AtomicBool,
    events_gate: Option<Arc<Semaphore>>,
    details_gate: Option<Arc<Semaphore>>,
}

impl RecordingBackend {
    fn with_roles(roles: &[&'static str]) -> Self {
        Self {
            roles: roles.to_vec(),
            events_total: 25,
            event_count: 10,
            ..Self::default()
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn record_list(&self, name: &str, params: &ListParams) {
        self.record(name);
        self.params
            .lock()
            .unwrap()
            .push((name.to_owned(), params.clone()));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    fn last_params(&self, name: &str) -> Option<ListParams> {
        self.params
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.clone())
    }

    fn write_result(&self) -> Result<(), CoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(CoreError::Rejected {
                message: "refused".into(),
            })
        } else {
            Ok(())
        }
    }
}

fn event(n: usize) -> Event {
    Event {
        id: ResourceId::Text(format!("event-{n}")),
        title: format!("Lecture {n}"),
        presenters: vec!["Ada".into()],
        series_id: None,
        series_name: None,
        location: None,
        start: None,
        end: None,
        technical_start: None,
        technical_end: None,
        status: Some("EVENTS.EVENTS.STATUS.PROCESSED".into()),
        displayable_status: None,
        has_comments: false,
        has_open_comments: false,
        needs_cutting: false,
    }
}

fn page<T>(results: Vec<T>, total: usize) -> Collection<T> {
    Collection {
        total,
        count: results.len(),
        offset: 0,
        limit: 10,
        results,
    }
}

#[async_trait]
impl AdminBackend for RecordingBackend {
    async fn me(&self) -> Result<UserInfo, CoreError> {
        self.record("me");
        Ok(UserInfo {
            username: "admin".into(),
            roles: self.roles.iter().map(|r| (*r).to_owned()).collect(),
            ..UserInfo::default()
        })
    }

    async fn list_themes(&self, params: &ListParams) -> Result<Collection<Theme>, CoreError> {
        self.record_list("list_themes", params);
        Ok(page(
            vec![Theme {
                id: ResourceId::Numeric(3),
                name: "Lecture".into(),
                description: None,
                creator: None,
                creation_date: None,
                default: true,
                usage: None,
            }],
            1,
        ))
    }

    async fn get_theme(&self, id: i64) -> Result<ThemeDetails, CoreError> {
        self.record(format!("get_theme:{id}"));
        Ok(ThemeDetails {
            id: ResourceId::Numeric(id),
            name: "Lecture".into(),
            description: None,
            creator: None,
            default: true,
            bumper_active: false,
            trailer_active: false,
            title_slide_active: false,
            license_slide_active: false,
            watermark_active: true,
            watermark_position: Some("topRight".into()),
        })
    }

    async fn create_theme(&self, theme: &NewTheme) -> Result<(), CoreError> {
        self.record(format!("create_theme:{}", theme.name));
        self.write_result()
    }

    async fn delete_theme(&self, id: i64) -> Result<(), CoreError> {
        self.record(format!("delete_theme:{id}"));
        self.write_result()
    }

    async fn list_events(&self, params: &ListParams) -> Result<Collection<Event>, CoreError> {
        self.record_list("list_events", params);
        if let Some(gate) = &self.events_gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(CoreError::Api {
                message: "server error".into(),
                status: Some(500),
            });
        }
        Ok(page(
            (0..self.event_count).map(event).collect(),
            self.events_total,
        ))
    }

    async fn delete_events(&self, ids: &[String]) -> Result<(), CoreError> {
        self.record(format!("delete_events:{}", ids.join(",")));
        self.write_result()
    }

    async fn new_event_metadata(&self) -> Result<Vec<MetadataCatalog>, CoreError> {
        self.record("new_event_metadata");
        Ok(vec![MetadataCatalog {
            flavor: "dublincore/episode".into(),
            title: "EVENTS.EVENTS.DETAILS.CATALOG.EPISODE".into(),
            fields: Vec::new(),
        }])
    }

    async fn list_asset_upload_options(&self) -> Result<Vec<UploadOption>, CoreError> {
        self.record("list_asset_upload_options");
        Ok(Vec::new())
    }

    async fn list_series(&self, params: &ListParams) -> Result<Collection<Series>, CoreError> {
        self.record_list("list_series", params);
        Ok(page(
            vec![Series {
                id: ResourceId::Text("series-1".into()),
                title: "Physics 101".into(),
                organizers: vec!["Ada".into()],
                contributors: Vec::new(),
                created_by: None,
                creation_date: None,
                language: None,
                license: None,
            }],
            1,
        ))
    }

    async fn list_acls(&self, params: &ListParams) -> Result<Collection<Acl>, CoreError> {
        self.record_list("list_acls", params);
        Ok(page(
            vec![Acl {
                id: ResourceId::Numeric(9),
                name: "public".into(),
            }],
            1,
        ))
    }

    async fn get_acl(&self, id: i64) -> Result<AclDetails, CoreError> {
        self.record(format!("get_acl:{id}"));
        if let Some(gate) = &self.details_gate {
            gate.acquire().await.unwrap().forget();
        }
        Ok(AclDetails {
            id: ResourceId::Numeric(id),
            name: "public".into(),
            organization: None,
            entries: vec![AclEntry {
                role: "ROLE_ANONYMOUS".into(),
                action: "read".into(),
                allow: true,
            }],
        })
    }

    async fn delete_acl(&self, id: i64) -> Result<(), CoreError> {
        self.record(format!("delete_acl:{id}"));
        self.write_result()
    }

    async fn list_filters(&self, resource: ResourceKind) -> Result<Vec<FilterField>, CoreError> {
        self.record(format!("list_filters:{resource}"));
        Ok(vec![FilterField {
            name: "status".into(),
            label: "Status".into(),
            kind: "select".into(),
            options: Vec::new(),
            value: None,
        }])
    }

    async fn list_stat_definitions(&self) -> Result<Vec<Stat>, CoreError> {
        self.record("list_stat_definitions");
        Ok(Vec::new())
    }
}

async fn setup(backend: RecordingBackend) -> (Arc<RecordingBackend>, Controller) {
    let backend = Arc::new(backend);
    let controller = Controller::with_settings(
        Arc::clone(&backend) as Arc<dyn AdminBackend>,
        10,
        Duration::from_secs(5),
    );
    controller.load_user().await.unwrap();
    (backend, controller)
}

const EVENT_ROLES: &[&str] = &[
    ROLE_UI_EVENTS_VIEW,
    ROLE_UI_SERIES_VIEW,
    ROLE_UI_EVENTS_CREATE,
    ROLE_UI_EVENTS_DELETE,
];

// ── Resource slices ─────────────────────────────────────────────────

#[tokio::test]
async fn successful_fetch_fills_the_slice() {
    let (_, controller) = setup(RecordingBackend::with_roles(&[])).await;

    controller.fetch_events().await.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.events.status, FetchStatus::Succeeded);
    assert_eq!(state.events.results.len(), state.events.count);
    assert_eq!(state.events.total, 25);
    assert!(state.events.error.is_none());
}

#[tokio::test]
async fn failed_fetch_keeps_previous_results() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[])).await;
    controller.fetch_events().await.unwrap();

    backend.fail_events.store(true, Ordering::SeqCst);
    assert!(controller.fetch_events().await.is_err());

    let state = controller.store().snapshot();
    assert_eq!(state.events.status, FetchStatus::Failed);
    assert_eq!(state.events.results.len(), 10);
    assert_eq!(state.events.error.as_ref().and_then(|e| e.status), Some(500));
}

#[tokio::test]
async fn theme_writes_notify_success_and_failure() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[])).await;
    let theme = NewTheme {
        name: "Lecture".into(),
        ..NewTheme::default()
    };

    assert!(controller.post_new_theme(&theme).await);
    backend.fail_writes.store(true, Ordering::SeqCst);
    assert!(!controller.post_new_theme(&theme).await);

    let keys: Vec<String> = controller.select(|s| {
        selectors::notifications(s)
            .iter()
            .map(|n| n.key.clone())
            .collect()
    });
    assert_eq!(keys, vec!["THEME_CREATED", "THEME_NOT_CREATED"]);
    assert_eq!(backend.count("create_theme:Lecture"), 2);
    // no optimistic insert
    assert!(controller.store().snapshot().themes.results.is_empty());
}

#[tokio::test]
async fn nameless_theme_is_rejected_locally() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[])).await;
    assert!(!controller.post_new_theme(&NewTheme::default()).await);
    assert!(!backend.calls().iter().any(|c| c.starts_with("create_theme")));
}

// ── Action cell ─────────────────────────────────────────────────────

#[tokio::test]
async fn controls_follow_roles() {
    let (_, controller) = setup(RecordingBackend::with_roles(&[ROLE_UI_ACLS_EDIT])).await;
    let cell = ActionCell::new(
        controller.clone(),
        AclRowActions,
        ResourceId::Numeric(9),
        "public".into(),
    );
    assert_eq!(cell.controls(), vec![CellControl::Details]);
    assert!(!cell.request_delete());
    assert!(cell.modal_snapshot().is_none());

    let theme_cell = ActionCell::new(
        controller,
        ThemeRowActions,
        ResourceId::Numeric(3),
        "Lecture".into(),
    );
    assert!(theme_cell.controls().is_empty());
}

#[tokio::test]
async fn details_are_fetched_before_the_modal_opens() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = RecordingBackend {
        details_gate: Some(Arc::clone(&gate)),
        ..RecordingBackend::with_roles(&[ROLE_UI_ACLS_EDIT])
    };
    let (backend, controller) = setup(backend).await;
    let cell = ActionCell::new(
        controller,
        AclRowActions,
        ResourceId::Numeric(9),
        "public".into(),
    );

    let pending = tokio::spawn({
        let cell = cell.clone();
        async move { cell.show_details().await }
    });

    while backend.count("get_acl:9") == 0 {
        tokio::task::yield_now().await;
    }
    assert!(cell.modal_snapshot().is_none());

    gate.add_permits(1);
    assert!(pending.await.unwrap());
    match cell.modal_snapshot() {
        Some(CellModal::Details(details)) => assert_eq!(details.policies().len(), 1),
        other => panic!("expected details modal, got {other:?}"),
    }
}

#[tokio::test]
async fn confirming_delete_runs_once_and_closes() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[ROLE_UI_ACLS_DELETE])).await;
    let cell = ActionCell::new(
        controller.clone(),
        AclRowActions,
        ResourceId::Numeric(9),
        "public".into(),
    );

    assert!(cell.request_delete());
    assert_eq!(backend.count("delete_acl:9"), 0);
    assert_eq!(cell.modal_snapshot(), Some(CellModal::ConfirmDelete));

    let (first, second) = tokio::join!(cell.confirm_delete(), cell.confirm_delete());
    assert!(first);
    assert!(!second);
    assert_eq!(backend.count("delete_acl:9"), 1);
    assert!(cell.modal_snapshot().is_none());

    let keys: Vec<String> =
        controller.select(|s| s.notifications.iter().map(|n| n.key.clone()).collect());
    assert_eq!(keys, vec!["ACL_DELETED"]);
}

#[tokio::test]
async fn theme_cell_loads_theme_details() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[ROLE_UI_THEMES_EDIT])).await;
    let cell = ActionCell::new(
        controller,
        ThemeRowActions,
        ResourceId::Numeric(3),
        "Lecture".into(),
    );

    assert!(cell.show_details().await);
    assert_eq!(backend.count("get_theme:3"), 1);
    cell.hide_details();
    assert!(cell.modal_snapshot().is_none());
}

// ── Events page ─────────────────────────────────────────────────────

fn events_page(controller: &Controller) -> (EventsPage, PointerHub) {
    let hub = PointerHub::new();
    (EventsPage::new(controller.clone(), hub.clone()), hub)
}

#[tokio::test]
async fn mount_loads_filters_then_events_into_table() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    controller.edit_text_filter("stale");
    let (page, _hub) = events_page(&controller);

    page.mount("#events").await;

    let filters = backend.position("list_filters:events").unwrap();
    let events = backend.position("list_events").unwrap();
    assert!(filters < events);
    assert_eq!(backend.count("list_stat_definitions"), 1);

    let params = backend.last_params("list_events").unwrap();
    assert_eq!(params.filter, None);
    assert_eq!(params.limit, 10);
    assert_eq!(params.offset, 0);

    let summary = page.summary();
    assert_eq!(summary.rows, 10);
    assert_eq!(summary.total, 25);
    assert!(!controller.select(selectors::is_show_actions));
}

#[tokio::test]
async fn filters_are_not_refetched_for_the_same_resource() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, _hub) = events_page(&controller);

    page.mount("#a").await;
    page.mount("#b").await;
    assert_eq!(backend.count("list_filters:events"), 1);
    assert_eq!(backend.count("list_events"), 2);
}

#[tokio::test(start_paused = true)]
async fn unmount_stops_polling_and_listening() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, hub) = events_page(&controller);

    page.mount("#events").await;
    assert_eq!(backend.count("list_events"), 1);
    assert_eq!(hub.listener_count(), 1);

    tokio::time::sleep(Duration::from_millis(5_100)).await;
    assert_eq!(backend.count("list_events"), 2);

    page.unmount();
    assert_eq!(hub.listener_count(), 0);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(backend.count("list_events"), 2);
}

#[tokio::test(start_paused = true)]
async fn remount_replaces_previous_poller() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, hub) = events_page(&controller);

    page.mount("#one").await;
    page.mount("#two").await;
    assert_eq!(hub.listener_count(), 1);
    assert!(page.on_hash_change("#two").is_none());

    tokio::time::sleep(Duration::from_millis(5_100)).await;
    // two mounts plus a single poll tick
    assert_eq!(backend.count("list_events"), 3);
}

#[tokio::test]
async fn late_events_after_unmount_skip_the_table() {
    let gate = Arc::new(Semaphore::new(0));
    let backend = RecordingBackend {
        events_gate: Some(Arc::clone(&gate)),
        ..RecordingBackend::with_roles(EVENT_ROLES)
    };
    let (backend, controller) = setup(backend).await;
    let (page, _hub) = events_page(&controller);

    let load = tokio::spawn(page.mount("#events"));
    while backend.count("list_events") == 0 {
        tokio::task::yield_now().await;
    }
    page.unmount();
    gate.add_permits(1);
    load.await.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.events.status, FetchStatus::Succeeded);
    assert!(state.table.rows.is_empty());
}

#[tokio::test]
async fn outside_click_closes_bulk_menu() {
    let (_, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, hub) = events_page(&controller);
    page.mount("#events").await;

    page.toggle_action_menu();
    assert!(!page.ui_snapshot().action_menu_open, "menu needs a selection");

    controller.select_row(ResourceId::Text("event-1".into()), true);
    page.set_action_container(Some(Region {
        x: 0,
        y: 2,
        width: 20,
        height: 6,
    }));
    page.toggle_action_menu();
    assert!(page.ui_snapshot().action_menu_open);

    hub.pointer_down(Point { x: 5, y: 3 });
    assert!(page.ui_snapshot().action_menu_open);

    hub.pointer_down(Point { x: 40, y: 3 });
    assert!(!page.ui_snapshot().action_menu_open);
}

#[tokio::test]
async fn bulk_actions_follow_roles() {
    let (_, controller) =
        setup(RecordingBackend::with_roles(&[ROLE_UI_EVENTS_DETAILS_METADATA_EDIT])).await;
    let (page, _hub) = events_page(&controller);

    assert_eq!(page.bulk_actions(), vec![BulkAction::EditEventsMetadata]);
    assert!(!page.select_bulk_action(BulkAction::DeleteEvents));
    assert!(page.select_bulk_action(BulkAction::EditEventsMetadata));
    assert_eq!(page.ui_snapshot().modal, Some(PageModal::EditEventsMetadata));
    assert!(page.nav_tabs().is_empty());
    assert!(!page.show_stats());
}

#[tokio::test]
async fn new_event_modal_waits_for_metadata_and_upload_options() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, _hub) = events_page(&controller);
    page.mount("#events").await;

    assert!(page.show_new_event_modal().await);

    let metadata = backend.position("new_event_metadata").unwrap();
    let options = backend.position("list_asset_upload_options").unwrap();
    assert!(metadata < options);
    assert_eq!(page.ui_snapshot().modal, Some(PageModal::NewEvent));
    assert!(!controller.select(selectors::is_fetching_asset_upload_options));
    assert_eq!(controller.store().snapshot().event_page.metadata.len(), 1);
}

#[tokio::test]
async fn series_tab_starts_at_first_page() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, _hub) = events_page(&controller);
    page.mount("#events").await;

    controller.set_offset(2);
    page.show_series_tab().await;
    assert_eq!(page.active_tab(), EventsTab::Series);
    assert_eq!(backend.last_params("list_series").unwrap().offset, 0);
    assert_eq!(
        controller.select(|s| s.table.resource),
        Some(ResourceKind::Series)
    );

    controller.set_offset(1);
    page.show_events_tab().await;
    assert_eq!(backend.last_params("list_events").unwrap().offset, 10);
}

#[tokio::test]
async fn deleting_selected_events_sends_their_ids() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, _hub) = events_page(&controller);
    page.mount("#events").await;

    controller.select_row(ResourceId::Text("event-2".into()), true);
    controller.select_row(ResourceId::Text("event-4".into()), true);
    assert!(page.select_bulk_action(BulkAction::DeleteEvents));

    assert!(page.delete_selected_events().await);
    assert_eq!(backend.count("delete_events:event-2,event-4"), 1);
    assert!(page.ui_snapshot().modal.is_none());
    assert!(controller.select(selectors::selected_row_ids).is_empty());
}

#[tokio::test]
async fn series_rows_never_reach_event_bulk_actions() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (page, _hub) = events_page(&controller);
    page.mount("#events").await;
    page.show_series_tab().await;

    controller.select_row(ResourceId::Text("series-1".into()), true);
    assert!(!controller.select(selectors::is_show_actions));
    assert!(page.bulk_actions().is_empty());
    assert!(!page.select_bulk_action(BulkAction::DeleteEvents));
    page.toggle_action_menu();
    assert!(!page.ui_snapshot().action_menu_open);

    assert!(!page.delete_selected_events().await);
    assert_eq!(backend.count("delete_events:series-1"), 0);
    assert!(backend.calls().iter().all(|c| !c.starts_with("delete_events")));
}

#[tokio::test]
async fn other_screens_start_unsorted_on_the_first_page() {
    let (backend, controller) = setup(RecordingBackend::with_roles(EVENT_ROLES)).await;
    let (events, _hub) = events_page(&controller);
    events.mount("#events").await;
    controller.set_offset(2);
    controller.sort_by("title");
    events.unmount();

    let themes = ListPage::new(ResourceKind::Themes, controller.clone());
    themes.mount("#themes").await;

    let params = backend.last_params("list_themes").unwrap();
    assert_eq!(params.offset, 0);
    assert_eq!(params.sort, None);
    assert_eq!(themes.summary().page, 1);

    controller.sort_by("name");
    themes.reload().await;
    assert_eq!(
        backend.last_params("list_themes").unwrap().sort.as_deref(),
        Some("name:ASC")
    );
}

#[tokio::test]
async fn hiding_a_column_updates_the_displayed_table() {
    let (_, controller) = setup(RecordingBackend::with_roles(&[])).await;
    let page = ListPage::new(ResourceKind::Themes, controller.clone());
    page.mount("#themes").await;
    assert_eq!(controller.select(|s| s.table.columns.len()), 5);

    controller.toggle_column(ResourceKind::Themes, "creator");
    let state = controller.store().snapshot();
    let names: Vec<&str> = state.table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["name", "description", "creation_date", "default"]);
    assert_eq!(state.table.rows[0].cells.len(), 4);

    // columns of a resource that is not displayed leave the table alone
    controller.toggle_column(ResourceKind::Events, "title");
    assert_eq!(controller.select(|s| s.table.columns.len()), 4);

    controller.show_all_columns(ResourceKind::Themes);
    assert_eq!(controller.select(|s| s.table.columns.len()), 5);
}

// ── List page ───────────────────────────────────────────────────────

#[tokio::test]
async fn list_page_loads_acls_into_table() {
    let (backend, controller) = setup(RecordingBackend::with_roles(&[])).await;
    let page = ListPage::new(ResourceKind::Acls, controller.clone());

    page.mount("#acls").await;

    assert!(backend.position("list_filters:acls") < backend.position("list_acls"));
    let state = controller.store().snapshot();
    assert_eq!(state.table.resource, Some(ResourceKind::Acls));
    assert_eq!(state.table.rows[0].cells, vec!["public".to_owned()]);

    page.unmount();
    assert!(!page.is_mounted());
}
