// ── Mount bookkeeping shared by all pages ──

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::pointer::ListenerHandle;
use crate::poll::RepeatingTask;

/// Resources owned by one mount. Dropping it stops polling and removes
/// the pointer listener.
struct Mount {
    hash: String,
    _poll: RepeatingTask,
    _listener: Option<ListenerHandle>,
}

#[derive(Default)]
pub(crate) struct Lifecycle {
    generation: AtomicU64,
    mount: Mutex<Option<Mount>>,
}

impl Lifecycle {
    /// Tear down any previous mount and start a new generation.
    pub(crate) fn begin(&self) -> u64 {
        let previous = self.lock().take();
        drop(previous);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn attach(
        &self,
        hash: String,
        poll: RepeatingTask,
        listener: Option<ListenerHandle>,
    ) {
        *self.lock() = Some(Mount {
            hash,
            _poll: poll,
            _listener: listener,
        });
    }

    /// Drop the current mount. In-flight loads of it become stale.
    pub(crate) fn end(&self) {
        let previous = self.lock().take();
        drop(previous);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// True while `generation` is the live mount.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation && self.lock().is_some()
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.lock().is_some()
    }

    pub(crate) fn hash(&self) -> Option<String> {
        self.lock().as_ref().map(|m| m.hash.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Mount>> {
        self.mount.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
