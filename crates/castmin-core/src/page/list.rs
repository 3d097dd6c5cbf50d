// ── Generic list page ──
//
// The theme and ACL screens share one lifecycle: load the resource's
// filters, clear the text filter, fetch, load into the table, and keep
// polling while mounted.

use std::future::Future;
use std::sync::{Arc, Weak};

use tracing::{debug, info, warn};

use super::lifecycle::Lifecycle;
use crate::controller::Controller;
use crate::model::ResourceKind;
use crate::poll::RepeatingTask;
use crate::selectors::{self, TableSummary};

#[derive(Clone)]
pub struct ListPage {
    inner: Arc<ListPageInner>,
}

struct ListPageInner {
    kind: ResourceKind,
    controller: Controller,
    lifecycle: Lifecycle,
}

impl ListPage {
    pub fn new(kind: ResourceKind, controller: Controller) -> Self {
        Self {
            inner: Arc::new(ListPageInner {
                kind,
                controller,
                lifecycle: Lifecycle::default(),
            }),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.inner.kind
    }

    pub fn controller(&self) -> &Controller {
        &self.inner.controller
    }

    pub fn mount(&self, hash: impl Into<String>) -> impl Future<Output = ()> + Send + 'static {
        let hash = hash.into();
        let kind = self.inner.kind;
        let generation = self.inner.lifecycle.begin();
        self.inner.controller.edit_text_filter("");
        self.inner.controller.retarget_table(kind);

        let weak: Weak<ListPageInner> = Arc::downgrade(&self.inner);
        let poll = RepeatingTask::spawn(self.inner.controller.poll_interval(), move || {
            let page = weak.upgrade().map(|inner| ListPage { inner });
            async move {
                if let Some(page) = page {
                    page.reload().await;
                }
            }
        });
        info!(resource = %kind, %hash, generation, "list page mounted");
        self.inner.lifecycle.attach(hash, poll, None);

        let page = self.clone();
        async move {
            let controller = &page.inner.controller;
            if controller.select(selectors::current_filter_resource) != Some(kind) {
                if let Err(e) = controller.fetch_filters(kind).await {
                    warn!(resource = %kind, error = %e, "loading filters failed");
                }
            }
            page.load_for(generation).await;
        }
    }

    pub fn unmount(&self) {
        self.inner.lifecycle.end();
        debug!(resource = %self.inner.kind, "list page unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.lifecycle.is_mounted()
    }

    /// Fetch the current page and show it.
    pub async fn reload(&self) {
        let generation = self.inner.lifecycle.generation();
        self.load_for(generation).await;
    }

    async fn load_for(&self, generation: u64) {
        let kind = self.inner.kind;
        let controller = &self.inner.controller;
        match controller.fetch_resource(kind).await {
            Ok(()) => {
                if self.inner.lifecycle.is_current(generation) {
                    controller.load_into_table(kind);
                }
            }
            Err(e) => warn!(resource = %kind, error = %e, "loading table failed"),
        }
    }

    pub fn summary(&self) -> TableSummary {
        self.inner.controller.select(selectors::table_summary)
    }
}

impl std::fmt::Debug for ListPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPage")
            .field("kind", &self.inner.kind)
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}
