// ── Row action cell ──
//
// Per-row "details" and "delete" controls. Each control exists only when
// the user holds its role. Details are fetched before the details modal
// opens; delete goes through a confirmation and runs at most once per
// confirmation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::controller::Controller;
use crate::error::CoreError;
use crate::model::{AclDetails, ResourceId, ResourceKind, ThemeDetails};
use crate::permission::{
    ROLE_UI_ACLS_DELETE, ROLE_UI_ACLS_EDIT, ROLE_UI_THEMES_DELETE, ROLE_UI_THEMES_EDIT, has_access,
};

/// Resource-specific behaviour behind an action cell.
#[async_trait]
pub trait RowActions: Send + Sync + 'static {
    type Details: Clone + Send + Sync + 'static;

    fn config(&self) -> ActionCellConfig;

    async fn fetch_details(
        &self,
        controller: &Controller,
        id: &ResourceId,
    ) -> Result<Self::Details, CoreError>;

    /// Delete the row; true on success. Notifications are the
    /// controller's business.
    async fn delete(&self, controller: &Controller, id: &ResourceId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCellConfig {
    pub resource: ResourceKind,
    pub details_role: &'static str,
    pub delete_role: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AclRowActions;

#[async_trait]
impl RowActions for AclRowActions {
    type Details = AclDetails;

    fn config(&self) -> ActionCellConfig {
        ActionCellConfig {
            resource: ResourceKind::Acls,
            details_role: ROLE_UI_ACLS_EDIT,
            delete_role: ROLE_UI_ACLS_DELETE,
        }
    }

    async fn fetch_details(
        &self,
        controller: &Controller,
        id: &ResourceId,
    ) -> Result<AclDetails, CoreError> {
        controller.fetch_acl_details(id).await
    }

    async fn delete(&self, controller: &Controller, id: &ResourceId) -> bool {
        controller.delete_acl(id).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeRowActions;

#[async_trait]
impl RowActions for ThemeRowActions {
    type Details = ThemeDetails;

    fn config(&self) -> ActionCellConfig {
        ActionCellConfig {
            resource: ResourceKind::Themes,
            details_role: ROLE_UI_THEMES_EDIT,
            delete_role: ROLE_UI_THEMES_DELETE,
        }
    }

    async fn fetch_details(
        &self,
        controller: &Controller,
        id: &ResourceId,
    ) -> Result<ThemeDetails, CoreError> {
        controller.fetch_theme_details(id).await
    }

    async fn delete(&self, controller: &Controller, id: &ResourceId) -> bool {
        controller.delete_theme(id).await
    }
}

/// Controls a cell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellControl {
    Details,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellModal<D> {
    Details(D),
    ConfirmDelete,
}

/// Action cell for one table row. Cloning shares the modal state.
pub struct ActionCell<A: RowActions> {
    inner: Arc<CellInner<A>>,
}

struct CellInner<A: RowActions> {
    controller: Controller,
    actions: A,
    row: ResourceId,
    label: String,
    modal: Mutex<Option<CellModal<A::Details>>>,
}

impl<A: RowActions> Clone for ActionCell<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: RowActions> ActionCell<A> {
    pub fn new(controller: Controller, actions: A, row: ResourceId, label: String) -> Self {
        Self {
            inner: Arc::new(CellInner {
                controller,
                actions,
                row,
                label,
                modal: Mutex::new(None),
            }),
        }
    }

    pub fn row(&self) -> &ResourceId {
        &self.inner.row
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Controls the current user may use.
    pub fn controls(&self) -> Vec<CellControl> {
        let config = self.inner.actions.config();
        self.inner.controller.select(|s| {
            let user = s.user.as_ref();
            let mut controls = Vec::with_capacity(2);
            if has_access(config.details_role, user) {
                controls.push(CellControl::Details);
            }
            if has_access(config.delete_role, user) {
                controls.push(CellControl::Delete);
            }
            controls
        })
    }

    fn allows(&self, control: CellControl) -> bool {
        self.controls().contains(&control)
    }

    /// Fetch details, then open the details modal.
    pub async fn show_details(&self) -> bool {
        if !self.allows(CellControl::Details) {
            return false;
        }
        let inner = &self.inner;
        match inner.actions.fetch_details(&inner.controller, &inner.row).await {
            Ok(details) => {
                *self.modal() = Some(CellModal::Details(details));
                true
            }
            Err(e) => {
                warn!(id = %inner.row, error = %e, "loading details failed");
                false
            }
        }
    }

    pub fn hide_details(&self) {
        let mut modal = self.modal();
        if matches!(*modal, Some(CellModal::Details(_))) {
            *modal = None;
        }
    }

    /// Ask for confirmation; nothing is deleted yet.
    pub fn request_delete(&self) -> bool {
        if !self.allows(CellControl::Delete) {
            return false;
        }
        *self.modal() = Some(CellModal::ConfirmDelete);
        true
    }

    pub fn cancel_delete(&self) {
        let mut modal = self.modal();
        if matches!(*modal, Some(CellModal::ConfirmDelete)) {
            *modal = None;
        }
    }

    /// Close the confirmation and delete the row. A second confirm
    /// without a new request does nothing.
    pub async fn confirm_delete(&self) -> bool {
        {
            let mut modal = self.modal();
            if !matches!(*modal, Some(CellModal::ConfirmDelete)) {
                return false;
            }
            *modal = None;
        }
        let inner = &self.inner;
        debug!(resource = %inner.actions.config().resource, id = %inner.row, "deleting row");
        inner.actions.delete(&inner.controller, &inner.row).await
    }

    pub fn modal_snapshot(&self) -> Option<CellModal<A::Details>> {
        self.modal().clone()
    }

    fn modal(&self) -> MutexGuard<'_, Option<CellModal<A::Details>>> {
        self.inner
            .modal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
