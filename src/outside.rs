//! Outside-interaction detection.
//!
//! One [`OutsideWatcher`] lives at the document level (host owns it for the
//! lifetime of the terminal session). Every mounted select registers its
//! bounding region and open flag and holds an [`OutsideGuard`]; dropping the
//! guard removes the registration exactly once, so repeated mount/unmount
//! cycles and multiple live instances never leak or double-fire.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::layout::Rect;

/// Shared handle to a widget's bounding region, updated by the widget on
/// every relayout.
pub type RegionHandle = Arc<Mutex<Rect>>;

/// Shared handle to a widget's open flag.
pub type OpenHandle = Arc<AtomicBool>;

struct WatchEntry {
    id: u64,
    region: RegionHandle,
    open: OpenHandle,
}

/// Document-level registry of open/region handles. Cheap to clone; clones
/// share the same registrations.
#[derive(Clone, Default)]
pub struct OutsideWatcher {
    entries: Arc<Mutex<Vec<WatchEntry>>>,
    next_id: Arc<AtomicU64>,
}

impl OutsideWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget. The returned guard deregisters on drop.
    pub fn watch(&self, region: RegionHandle, open: OpenHandle) -> OutsideGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.entries).push(WatchEntry { id, region, open });
        OutsideGuard {
            id,
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Deliver a document-level pointer-down. Closes every open registrant
    /// whose region does not contain the point. Interactions inside a
    /// registrant's own region are its own business and are left alone;
    /// nothing here ever touches text state.
    pub fn pointer_down(&self, x: u16, y: u16) {
        for entry in lock(&self.entries).iter() {
            if !entry.open.load(Ordering::SeqCst) {
                continue;
            }
            if !lock(&entry.region).contains(x, y) {
                log::debug!("[outside] pointer at ({x}, {y}) closes entry {}", entry.id);
                entry.open.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Number of live registrations.
    pub fn watch_count(&self) -> usize {
        lock(&self.entries).len()
    }
}

/// Scoped registration handle. Deregisters its entry exactly once on drop.
pub struct OutsideGuard {
    id: u64,
    entries: Weak<Mutex<Vec<WatchEntry>>>,
}

impl Drop for OutsideGuard {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            lock(&entries).retain(|entry| entry.id != self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
