//! Store failure handling.
//!
//! A wrapping store injects outages and timeouts; the controller must
//! surface them as retryable errors, leave the record untouched, and succeed
//! when the same request is retried.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gift_quest::core::GameKind;
use gift_quest::error::StoreError;
use gift_quest::progress::{
    InMemorySessionStore, ProgressionController, ProgressionState, SessionId, SessionProgress,
    SessionStore, StaticReward,
};
use gift_quest::QuestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fault {
    Unavailable,
    Timeout,
}

/// Fails the next `n` writes (and optionally reads) with the configured fault.
struct FlakyStore {
    inner: InMemorySessionStore,
    fault: Fault,
    failing_writes: AtomicUsize,
    failing_reads: AtomicUsize,
}

impl FlakyStore {
    fn new(fault: Fault) -> Self {
        Self {
            inner: InMemorySessionStore::new(),
            fault,
            failing_writes: AtomicUsize::new(0),
            failing_reads: AtomicUsize::new(0),
        }
    }

    fn fail_writes(&self, n: usize) {
        self.failing_writes.store(n, Ordering::SeqCst);
    }

    fn fail_reads(&self, n: usize) {
        self.failing_reads.store(n, Ordering::SeqCst);
    }

    fn trip(&self, budget: &AtomicUsize) -> Result<(), StoreError> {
        let tripped = budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !tripped {
            return Ok(());
        }
        Err(match self.fault {
            Fault::Unavailable => StoreError::Unavailable("connection refused".into()),
            Fault::Timeout => StoreError::Timeout(Duration::from_millis(500)),
        })
    }
}

impl SessionStore for FlakyStore {
    fn create(&self) -> Result<SessionId, StoreError> {
        self.trip(&self.failing_writes)?;
        self.inner.create()
    }

    fn get(&self, session_id: &SessionId) -> Result<SessionProgress, StoreError> {
        self.trip(&self.failing_reads)?;
        self.inner.get(session_id)
    }

    fn put(&self, progress: &SessionProgress) -> Result<(), StoreError> {
        self.trip(&self.failing_writes)?;
        self.inner.put(progress)
    }
}

fn controller(fault: Fault) -> ProgressionController<FlakyStore, StaticReward> {
    common::init_tracing();
    ProgressionController::new(FlakyStore::new(fault), StaticReward::new("a kite"))
}

/// Retry a controller call while it reports a retryable error.
fn with_retries<T>(attempts: usize, mut op: impl FnMut() -> Result<T, QuestError>) -> Result<T, QuestError> {
    let mut last = None;
    for _ in 0..attempts {
        match op() {
            Err(err) if err.is_retryable() => last = Some(err),
            other => return other,
        }
    }
    Err(last.unwrap())
}

#[test]
fn test_failed_write_surfaces_store_unavailable() {
    let quest = controller(Fault::Unavailable);
    let id = quest.start_session().unwrap().session_id();

    quest.store().fail_writes(1);
    let err = quest.mark_completed(id, GameKind::TicTacToe).unwrap_err();
    assert!(matches!(err, QuestError::StoreUnavailable(_)));
    assert!(err.is_retryable());

    // Nothing was written.
    let progress = quest.progress(id).unwrap();
    assert_eq!(progress.state(), ProgressionState::NotStarted);
    assert_eq!(progress.version(), 0);
}

#[test]
fn test_timeout_maps_to_store_unavailable() {
    let quest = controller(Fault::Timeout);
    let id = quest.start_session().unwrap().session_id();

    quest.store().fail_reads(1);
    let err = quest.progress(id).unwrap_err();
    assert!(matches!(err, QuestError::StoreUnavailable(ref reason) if reason.contains("timed out")));
}

#[test]
fn test_failed_create_returns_error() {
    let quest = controller(Fault::Unavailable);
    quest.store().fail_writes(1);
    assert!(matches!(quest.start_session(), Err(QuestError::StoreUnavailable(_))));
    assert!(quest.start_session().is_ok());
}

#[test]
fn test_retry_after_outage_completes_the_game() {
    let quest = controller(Fault::Unavailable);
    let id = quest.start_session().unwrap().session_id();

    quest.store().fail_writes(2);
    let progress = with_retries(3, || quest.mark_completed(id, GameKind::RockPaperScissors)).unwrap();
    assert!(progress.is_completed(GameKind::RockPaperScissors));
    assert_eq!(progress.version(), 1);
}

#[test]
fn test_retry_gives_up_when_outage_outlasts_budget() {
    let quest = controller(Fault::Timeout);
    let id = quest.start_session().unwrap().session_id();

    quest.store().fail_writes(5);
    let err = with_retries(3, || quest.mark_completed(id, GameKind::FindTheGift)).unwrap_err();
    assert!(err.is_retryable());
    assert!(!quest.progress(id).unwrap().is_completed(GameKind::FindTheGift));
}

#[test]
fn test_claim_survives_write_failure() {
    let quest = controller(Fault::Unavailable);
    let id = quest.start_session().unwrap().session_id();
    for kind in GameKind::ALL {
        quest.mark_completed(id, kind).unwrap();
    }

    quest.store().fail_writes(1);
    assert!(matches!(quest.claim_reward(id), Err(QuestError::StoreUnavailable(_))));
    assert_eq!(quest.progress(id).unwrap().state(), ProgressionState::AllComplete);

    let claim = quest.claim_reward(id).unwrap();
    assert!(claim.newly_claimed);
    assert_eq!(claim.message, "a kite");
    assert!(!quest.claim_reward(id).unwrap().newly_claimed);
}

#[test]
fn test_not_found_is_not_retryable() {
    let quest = controller(Fault::Unavailable);
    let err = quest.claim_reward(SessionId::new()).unwrap_err();
    assert!(matches!(err, QuestError::SessionNotFound(_)));
    assert!(!err.is_retryable());
}

/// A writer that bypasses the controller makes the controller's write stale.
#[test]
fn test_out_of_band_write_is_a_conflict() {
    let store = InMemorySessionStore::new();
    let id = store.create().unwrap();

    let stale = store.get(&id).unwrap();
    let quest = ProgressionController::new(store, StaticReward::default());
    quest.mark_completed(id, GameKind::TicTacToe).unwrap();

    // Replaying a record based on version 0 is rejected.
    let err = quest.store().put(&stale).unwrap_err();
    assert!(matches!(err, StoreError::Conflict { found: 1, .. }));
    assert!(QuestError::from(err).is_retryable());
}

/// Failed claim writes never make the provider hand out a second reward.
#[test]
fn test_provider_asked_once_across_failed_claims() {
    common::init_tracing();
    let calls = AtomicUsize::new(0);
    let quest = ProgressionController::new(FlakyStore::new(Fault::Timeout), |_: &SessionId| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        format!("gift #{n}")
    });
    let id = quest.start_session().unwrap().session_id();
    for kind in GameKind::ALL {
        quest.mark_completed(id, kind).unwrap();
    }

    quest.store().fail_writes(2);
    assert!(quest.claim_reward(id).unwrap_err().is_retryable());
    assert!(quest.claim_reward(id).unwrap_err().is_retryable());
    assert_eq!(quest.pending_rewards(), 1);

    let claim = quest.claim_reward(id).unwrap();
    assert!(claim.newly_claimed);
    assert_eq!(claim.message, "gift #0");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(quest.pending_rewards(), 0);

    let again = quest.claim_reward(id).unwrap();
    assert_eq!(again.message, "gift #0");
    assert_eq!(again.claimed_at, claim.claimed_at);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
