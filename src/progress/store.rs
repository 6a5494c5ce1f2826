//! Session storage contract and the in-memory store.
//!
//! ## Contract
//!
//! - `create` hands out a fresh, collision-free id and persists an empty record
//! - `get` returns the stored record or `StoreError::NotFound`
//! - `put` accepts a record only if the stored version is exactly one behind;
//!   anything else is `StoreError::Conflict`
//!
//! Stores may time out or be unavailable; those errors surface to the caller
//! as retryable failures, never silently absorbed.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::session::{SessionId, SessionProgress};
use crate::error::StoreError;

/// Durable keyed storage for session progress.
pub trait SessionStore: Send + Sync {
    /// Allocate a new session and persist its empty record.
    fn create(&self) -> Result<SessionId, StoreError>;

    /// Load a session's record.
    fn get(&self, session_id: &SessionId) -> Result<SessionProgress, StoreError>;

    /// Replace a session's record.
    ///
    /// `progress.version()` must be exactly one more than the stored version.
    fn put(&self, progress: &SessionProgress) -> Result<(), StoreError>;
}

/// In-process store keeping bincode-encoded records.
///
/// Encoding on write mirrors what a remote key-value store would hold and
/// keeps readers from sharing mutable state with the map.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RwLock<FxHashMap<SessionId, Vec<u8>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Drop a session's record, as a retention policy would.
    pub fn evict(&self, session_id: &SessionId) -> bool {
        self.records.write().remove(session_id).is_some()
    }

    fn encode(progress: &SessionProgress) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(progress).map_err(|e| StoreError::Corrupt {
            session_id: progress.session_id(),
            reason: e.to_string(),
        })
    }

    fn decode(session_id: SessionId, bytes: &[u8]) -> Result<SessionProgress, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Corrupt {
            session_id,
            reason: e.to_string(),
        })
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self) -> Result<SessionId, StoreError> {
        let mut records = self.records.write();
        let session_id = loop {
            let candidate = SessionId::new();
            if !records.contains_key(&candidate) {
                break candidate;
            }
        };
        let bytes = Self::encode(&SessionProgress::new(session_id))?;
        records.insert(session_id, bytes);
        debug!(%session_id, "stored new session");
        Ok(session_id)
    }

    fn get(&self, session_id: &SessionId) -> Result<SessionProgress, StoreError> {
        let records = self.records.read();
        let bytes = records
            .get(session_id)
            .ok_or(StoreError::NotFound(*session_id))?;
        Self::decode(*session_id, bytes)
    }

    fn put(&self, progress: &SessionProgress) -> Result<(), StoreError> {
        let session_id = progress.session_id();
        let bytes = Self::encode(progress)?;

        let mut records = self.records.write();
        let stored = records
            .get(&session_id)
            .ok_or(StoreError::NotFound(session_id))?;
        let found = Self::decode(session_id, stored)?.version();
        let expected = progress.version().saturating_sub(1);
        if found != expected || progress.version() == 0 {
            return Err(StoreError::Conflict {
                session_id,
                expected,
                found,
            });
        }

        records.insert(session_id, bytes);
        debug!(%session_id, version = progress.version(), "stored session progress");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameKind;

    #[test]
    fn test_create_then_get() {
        let store = InMemorySessionStore::new();
        let id = store.create().unwrap();

        let progress = store.get(&id).unwrap();
        assert_eq!(progress.session_id(), id);
        assert_eq!(progress.version(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_gives_distinct_ids() {
        let store = InMemorySessionStore::new();
        let a = store.create().unwrap();
        let b = store.create().unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_unknown() {
        let store = InMemorySessionStore::new();
        assert!(matches!(
            store.get(&SessionId::new()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_put_requires_next_version() {
        let store = InMemorySessionStore::new();
        let id = store.create().unwrap();

        let mut progress = store.get(&id).unwrap();
        progress.mark(GameKind::TicTacToe);

        // Same version as stored: rejected.
        assert!(matches!(
            store.put(&progress),
            Err(StoreError::Conflict { expected: 0, found: 0, .. })
        ));

        progress.bump_version();
        store.put(&progress).unwrap();
        assert_eq!(store.get(&id).unwrap(), progress);

        // Replaying the same write is now stale.
        assert!(matches!(store.put(&progress), Err(StoreError::Conflict { .. })));
    }

    #[test]
    fn test_put_unknown_session() {
        let store = InMemorySessionStore::new();
        let mut progress = SessionProgress::new(SessionId::new());
        progress.bump_version();
        assert!(matches!(store.put(&progress), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_evict() {
        let store = InMemorySessionStore::new();
        let id = store.create().unwrap();
        assert!(store.evict(&id));
        assert!(!store.evict(&id));
        assert!(store.is_empty());
    }
}
