// ── Store handle ──
//
// Cheaply cloneable handle over a `watch` channel. Writes are serialized
// by `send_modify`; every subscriber is woken after each transition.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use super::{AppState, Transition};

#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<AppState>>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply a transition and notify subscribers.
    pub fn dispatch(&self, transition: Transition) {
        trace!(?transition, "dispatch");
        self.tx.send_modify(|state| state.apply(transition));
    }

    /// Run a selector against the current state.
    pub fn select<R>(&self, selector: impl FnOnce(&AppState) -> R) -> R {
        selector(&self.tx.borrow())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Receiver woken on every transition.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("subscribers", &self.tx.receiver_count())
            .finish_non_exhaustive()
    }
}
