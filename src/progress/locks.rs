//! Per-session mutual exclusion.
//!
//! Read-modify-write of one session's record must not interleave with
//! another on the same session. Different sessions never contend: each id
//! gets its own mutex, created on first use and dropped once nobody holds
//! or waits on it.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

use super::session::SessionId;

/// Lazily created mutex per session id.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding `session_id`'s mutex.
    ///
    /// The map entry is released even if `f` panics.
    pub fn with_lock<T>(&self, session_id: SessionId, f: impl FnOnce() -> T) -> T {
        // Clone out of the map so the shard lock is released before blocking.
        let lock = self.locks.entry(session_id).or_default().clone();
        let release = Release {
            locks: &self.locks,
            session_id,
            lock,
        };
        let _guard = release.lock.lock();
        f()
    }

    /// Number of session mutexes currently allocated.
    #[must_use]
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Drops a session's map entry once nobody holds or waits on its mutex.
struct Release<'a> {
    locks: &'a DashMap<SessionId, Arc<Mutex<()>>>,
    session_id: SessionId,
    lock: Arc<Mutex<()>>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        // Two references left, ours and the map's.
        self.locks.remove_if(&self.session_id, |_, lock| {
            Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2
        });
    }
}
