// ── Global pointer listeners ──
//
// The TUI forwards every mouse-down here. Pages register listeners (for
// example to close a dropdown when the click lands outside it) and get a
// handle back; dropping the handle removes the listener.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// A rectangular screen area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && u32::from(point.x) < u32::from(self.x) + u32::from(self.width)
            && u32::from(point.y) < u32::from(self.y) + u32::from(self.height)
    }
}

type Listener = Arc<dyn Fn(Point) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    listeners: Mutex<BTreeMap<u64, Listener>>,
}

/// Fan-out point for pointer-down events. Cheap to clone.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Arc<Registry>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays active until the handle is dropped.
    #[must_use = "dropping the handle removes the listener"]
    pub fn add_listener(&self, listener: impl Fn(Point) + Send + Sync + 'static) -> ListenerHandle {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(listener));
        ListenerHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Deliver a pointer-down to every listener.
    pub fn pointer_down(&self, point: Point) {
        let listeners: Vec<Listener> = self
            .registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(point);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Registration of one pointer listener.
#[derive(Debug)]
pub struct ListenerHandle {
    id: u64,
    registry: std::sync::Weak<Registry>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn region_bounds_are_half_open() {
        let r = Region { x: 10, y: 5, width: 4, height: 2 };
        assert!(r.contains(Point { x: 10, y: 5 }));
        assert!(r.contains(Point { x: 13, y: 6 }));
        assert!(!r.contains(Point { x: 14, y: 6 }));
        assert!(!r.contains(Point { x: 12, y: 7 }));
    }

    #[test]
    fn dropping_handle_removes_listener() {
        let hub = PointerHub::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let handle = hub.add_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        hub.pointer_down(Point { x: 0, y: 0 });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_count(), 1);

        drop(handle);
        hub.pointer_down(Point { x: 0, y: 0 });
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn listener_may_touch_the_hub() {
        let hub = PointerHub::new();
        let inner = hub.clone();
        let _handle = hub.add_listener(move |_| {
            let _ = inner.listener_count();
        });
        hub.pointer_down(Point { x: 1, y: 1 });
    }
}
