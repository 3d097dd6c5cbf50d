// ── Controller ──
//
// The orchestration handle consumers hold. Owns the backend and the
// store, runs every async operation (list, create, delete, details),
// translates outcomes into slice transitions, and emits notifications
// on explicit success and failure branches.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tracing::{debug, error, info, warn};

use castmin_api::transport::{TlsMode, TransportConfig};
use castmin_api::{AdminClient, ListParams, NewTheme};

use crate::backend::{AdminBackend, Listable};
use crate::config::{
    AuthCredentials, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL, ServerConfig, TlsVerification,
};
use crate::error::{CoreError, SliceError};
use crate::model::{
    Acl, AclDetails, Collection, Event, ResourceId, ResourceKind, Series, Theme, ThemeDetails,
};
use crate::notification::{
    ACL_DELETED, ACL_NOT_DELETED, EVENTS_DELETED, EVENTS_NOT_DELETED, Notification, Severity,
    THEME_CREATED, THEME_DELETED, THEME_NOT_CREATED, THEME_NOT_DELETED,
};
use crate::params::list_params;
use crate::selectors;
use crate::store::{AppState, SliceAction, Store, Transition};
use crate::table_config::Column;

/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    backend: Arc<dyn AdminBackend>,
    store: Store,
    poll_interval: Duration,
}

impl Controller {
    /// Controller over an existing backend with default tuning.
    pub fn new(backend: Arc<dyn AdminBackend>) -> Self {
        Self::with_settings(backend, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_settings(
        backend: Arc<dyn AdminBackend>,
        page_size: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                backend,
                store: Store::new(AppState::new(page_size.max(1))),
                poll_interval,
            }),
        }
    }

    /// Build an HTTP backend, log in, and load the current user.
    pub async fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let client = AdminClient::new(config.url.clone(), &transport)?;

        match &config.auth {
            AuthCredentials::Session { username, password } => {
                client.login(username, password).await?;
                debug!(%username, "session authentication successful");
            }
            AuthCredentials::Anonymous => {
                debug!("no credentials -- skipping login");
            }
        }

        let controller = Self::with_settings(
            Arc::new(client),
            config.page_size,
            config.poll_interval,
        );
        controller.load_user().await?;
        info!(url = %config.url, "connected to admin server");
        Ok(controller)
    }

    /// End the session and forget the user.
    pub async fn disconnect(&self) {
        if let Err(e) = self.inner.backend.logout().await {
            warn!(error = %e, "logout failed (non-fatal)");
        }
        self.dispatch(Transition::SetUser(None));
        debug!("disconnected");
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub fn backend(&self) -> &dyn AdminBackend {
        self.inner.backend.as_ref()
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    pub fn dispatch(&self, transition: Transition) {
        self.inner.store.dispatch(transition);
    }

    pub fn select<R>(&self, selector: impl FnOnce(&AppState) -> R) -> R {
        self.inner.store.select(selector)
    }

    // ── Session ──────────────────────────────────────────────────────

    pub async fn load_user(&self) -> Result<(), CoreError> {
        let user = self.inner.backend.me().await?;
        debug!(username = %user.username, roles = user.roles.len(), "loaded user");
        self.dispatch(Transition::SetUser(Some(user)));
        Ok(())
    }

    // ── Resource slices ──────────────────────────────────────────────

    /// List one page of `T` with the current filter, sort and paging
    /// state, and record the outcome in its slice.
    pub async fn fetch<T: Listable>(&self) -> Result<Collection<T>, CoreError> {
        let params = self.select(list_params);
        self.dispatch(T::transition(SliceAction::Pending));
        debug!(resource = %T::KIND, ?params, "fetching");

        match T::list(self.backend(), &params).await {
            Ok(page) => {
                debug!(resource = %T::KIND, count = page.results.len(), total = page.total, "fetched");
                self.dispatch(T::transition(SliceAction::Fulfilled(page.clone())));
                Ok(page)
            }
            Err(e) => {
                warn!(resource = %T::KIND, error = %e, "fetch failed");
                self.dispatch(T::transition(SliceAction::Rejected(SliceError::from(&e))));
                Err(e)
            }
        }
    }

    pub async fn fetch_themes(&self) -> Result<Collection<Theme>, CoreError> {
        self.fetch::<Theme>().await
    }

    pub async fn fetch_events(&self) -> Result<Collection<Event>, CoreError> {
        self.fetch::<Event>().await
    }

    pub async fn fetch_series(&self) -> Result<Collection<Series>, CoreError> {
        self.fetch::<Series>().await
    }

    pub async fn fetch_acls(&self) -> Result<Collection<Acl>, CoreError> {
        self.fetch::<Acl>().await
    }

    /// Fetch whichever slice backs `kind`.
    pub async fn fetch_resource(&self, kind: ResourceKind) -> Result<(), CoreError> {
        match kind {
            ResourceKind::Events => self.fetch_events().await.map(drop),
            ResourceKind::Series => self.fetch_series().await.map(drop),
            ResourceKind::Themes => self.fetch_themes().await.map(drop),
            ResourceKind::Acls => self.fetch_acls().await.map(drop),
        }
    }

    /// Replace a slice's column set; the table follows if it shows `kind`.
    pub fn set_columns(&self, kind: ResourceKind, columns: Vec<Column>) {
        self.dispatch(match kind {
            ResourceKind::Events => Transition::Events(SliceAction::SetColumns(columns)),
            ResourceKind::Series => Transition::Series(SliceAction::SetColumns(columns)),
            ResourceKind::Themes => Transition::Themes(SliceAction::SetColumns(columns)),
            ResourceKind::Acls => Transition::Acls(SliceAction::SetColumns(columns)),
        });
        if self.select(|s| s.table.resource) == Some(kind) {
            self.load_into_table(kind);
        }
    }

    /// Flip the visibility of one column.
    pub fn toggle_column(&self, kind: ResourceKind, name: &str) {
        let mut columns = self.select(|s| match kind {
            ResourceKind::Events => s.events.columns.clone(),
            ResourceKind::Series => s.series.columns.clone(),
            ResourceKind::Themes => s.themes.columns.clone(),
            ResourceKind::Acls => s.acls.columns.clone(),
        });
        if let Some(col) = columns.iter_mut().find(|c| c.name == name) {
            col.deactivated = !col.deactivated;
        }
        self.set_columns(kind, columns);
    }

    /// Bring every hidden column of `kind` back.
    pub fn show_all_columns(&self, kind: ResourceKind) {
        let mut columns = self.select(|s| match kind {
            ResourceKind::Events => s.events.columns.clone(),
            ResourceKind::Series => s.series.columns.clone(),
            ResourceKind::Themes => s.themes.columns.clone(),
            ResourceKind::Acls => s.acls.columns.clone(),
        });
        for col in &mut columns {
            col.deactivated = false;
        }
        self.set_columns(kind, columns);
    }

    // ── Themes ───────────────────────────────────────────────────────

    pub async fn fetch_theme_details(&self, id: &ResourceId) -> Result<ThemeDetails, CoreError> {
        self.inner.backend.get_theme(numeric_id("theme", id)?).await
    }

    pub async fn create_theme(&self, theme: &NewTheme) -> Result<(), CoreError> {
        if theme.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "theme name is required".into(),
            });
        }
        self.inner.backend.create_theme(theme).await
    }

    /// Create a theme and tell the user how it went.
    pub async fn post_new_theme(&self, theme: &NewTheme) -> bool {
        let result = self.create_theme(theme).await;
        self.report(result, THEME_CREATED, THEME_NOT_CREATED)
    }

    pub async fn delete_theme(&self, id: &ResourceId) -> bool {
        let result = match numeric_id("theme", id) {
            Ok(id) => self.inner.backend.delete_theme(id).await,
            Err(e) => Err(e),
        };
        self.report(result, THEME_DELETED, THEME_NOT_DELETED)
    }

    // ── ACLs ─────────────────────────────────────────────────────────

    pub async fn fetch_acl_details(&self, id: &ResourceId) -> Result<AclDetails, CoreError> {
        let details = self.inner.backend.get_acl(numeric_id("acl", id)?).await?;
        self.dispatch(Transition::SetAclDetails(Some(details.clone())));
        Ok(details)
    }

    pub async fn delete_acl(&self, id: &ResourceId) -> bool {
        let result = match numeric_id("acl", id) {
            Ok(id) => self.inner.backend.delete_acl(id).await,
            Err(e) => Err(e),
        };
        self.report(result, ACL_DELETED, ACL_NOT_DELETED)
    }

    // ── Events ───────────────────────────────────────────────────────

    pub async fn delete_events(&self, ids: &[ResourceId]) -> bool {
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let result = self.inner.backend.delete_events(&ids).await;
        self.report(result, EVENTS_DELETED, EVENTS_NOT_DELETED)
    }

    /// Metadata catalogs for the new-event wizard.
    pub async fn fetch_event_metadata(&self) -> Result<(), CoreError> {
        self.dispatch(Transition::MetadataLoading);
        match self.inner.backend.new_event_metadata().await {
            Ok(catalogs) => {
                self.dispatch(Transition::MetadataLoaded(catalogs));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "loading event metadata failed");
                self.dispatch(Transition::MetadataFailed);
                Err(e)
            }
        }
    }

    pub async fn fetch_asset_upload_options(&self) -> Result<(), CoreError> {
        self.dispatch(Transition::UploadOptionsLoading);
        match self.inner.backend.list_asset_upload_options().await {
            Ok(options) => {
                self.dispatch(Transition::UploadOptionsLoaded(options));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "loading upload options failed");
                self.dispatch(Transition::UploadOptionsFailed);
                Err(e)
            }
        }
    }

    pub fn set_show_actions(&self, show: bool) {
        self.dispatch(Transition::SetShowActions(show));
    }

    // ── Filters & stats ──────────────────────────────────────────────

    pub async fn fetch_filters(&self, kind: ResourceKind) -> Result<(), CoreError> {
        let filters = self.inner.backend.list_filters(kind).await?;
        debug!(resource = %kind, count = filters.len(), "loaded filters");
        self.dispatch(Transition::LoadFilters {
            resource: kind,
            filters,
        });
        Ok(())
    }

    /// Load counter definitions and count each one with a one-row
    /// events query. Counts that fail stay at zero.
    pub async fn fetch_stats(&self) -> Result<(), CoreError> {
        let backend = self.backend();
        let mut stats = backend.list_stat_definitions().await?;

        let counts = join_all(stats.iter().map(|stat| {
            let filter = stat.filter_string();
            let params = ListParams {
                limit: 1,
                offset: 0,
                filter: (!filter.is_empty()).then_some(filter),
                sort: None,
            };
            async move { backend.list_events(&params).await }
        }))
        .await;

        for (stat, count) in stats.iter_mut().zip(counts) {
            match count {
                Ok(page) => stat.count = page.total,
                Err(e) => warn!(stat = %stat.name, error = %e, "counting stat failed"),
            }
        }

        self.dispatch(Transition::SetStats(stats));
        Ok(())
    }

    pub fn edit_text_filter(&self, text: impl Into<String>) {
        self.dispatch(Transition::EditTextFilter(text.into()));
    }

    pub fn set_filter_value(&self, name: impl Into<String>, value: Option<String>) {
        self.dispatch(Transition::SetFilterValue {
            name: name.into(),
            value,
        });
        self.dispatch(Transition::SetOffset(0));
    }

    pub fn reset_filters(&self) {
        self.dispatch(Transition::ResetFilterValues);
        self.dispatch(Transition::SetOffset(0));
    }

    // ── Table ────────────────────────────────────────────────────────

    pub fn load_into_table(&self, kind: ResourceKind) {
        self.dispatch(Transition::LoadTable(kind));
    }

    /// Start `kind` from its first page, unsorted, unless the table
    /// already shows it. Paging and sort belong to the resource on screen.
    pub fn retarget_table(&self, kind: ResourceKind) {
        if self.select(|s| s.table.resource) == Some(kind) {
            return;
        }
        debug!(resource = %kind, "resetting table position");
        self.dispatch(Transition::SetOffset(0));
        self.clear_sort();
    }

    pub fn clear_sort(&self) {
        self.dispatch(Transition::SetSort {
            column: None,
            reverse: false,
        });
    }

    /// Zero-based page index.
    pub fn set_offset(&self, page: usize) {
        self.dispatch(Transition::SetOffset(page));
    }

    /// Move to a page, clamped to the known page count.
    pub fn goto_page(&self, page: usize) {
        let last = self.select(|s| s.table.pagination.page_count().saturating_sub(1));
        self.set_offset(page.min(last));
    }

    /// Sort by `column`; sorting by the current column again flips the
    /// direction.
    pub fn sort_by(&self, column: &str) {
        let (current, reverse) =
            self.select(|s| (s.table.sort.column.clone(), s.table.sort.reverse));
        let reverse = current.as_deref() == Some(column) && !reverse;
        self.dispatch(Transition::SetSort {
            column: Some(column.to_owned()),
            reverse,
        });
    }

    /// Tick or untick a row; the bulk-actions affordance follows the
    /// selection.
    pub fn select_row(&self, id: ResourceId, selected: bool) {
        self.dispatch(Transition::SelectRow { id, selected });
        self.sync_show_actions();
    }

    pub fn select_all(&self, selected: bool) {
        self.dispatch(Transition::SelectAll(selected));
        self.sync_show_actions();
    }

    /// Bulk actions only apply to events.
    fn sync_show_actions(&self) {
        let any = self.select(|s| {
            s.table.resource == Some(ResourceKind::Events)
                && s.table.rows.iter().any(|r| r.selected)
        });
        if self.select(selectors::is_show_actions) != any {
            self.set_show_actions(any);
        }
    }

    // ── Notifications ────────────────────────────────────────────────

    pub fn notify(&self, severity: Severity, key: &str) {
        self.dispatch(Transition::Notify(Notification::new(0, severity, key)));
    }

    pub fn notify_with_context(&self, severity: Severity, key: &str, context: String) {
        self.dispatch(Transition::Notify(
            Notification::new(0, severity, key).with_context(context),
        ));
    }

    pub fn dismiss(&self, id: u64) {
        self.dispatch(Transition::Dismiss(id));
    }

    pub fn expire_notifications(&self, now: DateTime<Utc>) {
        if self.select(|s| s.notifications.iter().any(|n| n.is_expired(now))) {
            self.dispatch(Transition::ExpireNotifications(now));
        }
    }

    /// Turn a write outcome into a notification; true on success.
    fn report(&self, result: Result<(), CoreError>, ok_key: &str, err_key: &str) -> bool {
        match result {
            Ok(()) => {
                info!(key = ok_key, "operation succeeded");
                self.notify(Severity::Success, ok_key);
                true
            }
            Err(e) => {
                error!(key = err_key, error = %e, "operation failed");
                self.notify_with_context(Severity::Error, err_key, e.to_string());
                false
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn numeric_id(resource: &str, id: &ResourceId) -> Result<i64, CoreError> {
    id.as_numeric().ok_or_else(|| CoreError::InvalidId {
        resource: resource.into(),
        identifier: id.to_string(),
    })
}

fn build_transport(config: &ServerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
        ..TransportConfig::default()
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
