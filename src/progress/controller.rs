//! Progression state machine.
//!
//! ```text
//! NotStarted ──mark──▶ InProgress ──mark (last game)──▶ AllComplete ──claim──▶ Claimed
//! ```
//!
//! All operations on one session run under that session's mutex, so the
//! read-modify-write against the store never interleaves. Operations on
//! different sessions proceed independently.
//!
//! The reward provider is asked at most once per session. Its message is
//! held until the claim is stored, so a claim retried after a failed write
//! hands out the same message without asking again.
//!
//! The controller performs no retries. Store failures surface as
//! `StoreUnavailable` or `Conflict`; both are safe to retry because
//! completion marks are idempotent per game and claims are idempotent once
//! they succeed.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info, instrument, warn};

use super::locks::SessionLocks;
use super::reward::RewardContentProvider;
use super::session::{ProgressionState, SessionId, SessionProgress};
use super::store::SessionStore;
use crate::core::GameKind;
use crate::error::{QuestError, Result, StoreError};
use crate::rules::MiniGame;

/// Outcome of a successful `claim_reward`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardClaim {
    /// Session snapshot after the claim.
    pub progress: SessionProgress,
    /// The reward text; identical on every claim of the same session.
    pub message: String,
    /// When the reward was first claimed; identical on every claim.
    pub claimed_at: DateTime<Utc>,
    /// False when the reward had already been claimed earlier.
    pub newly_claimed: bool,
}

/// Drives sessions through the progression state machine.
pub struct ProgressionController<S, R> {
    store: S,
    rewards: R,
    locks: SessionLocks,
    // Provider messages for claims not yet stored.
    pending_rewards: DashMap<SessionId, String>,
}

impl<S: SessionStore, R: RewardContentProvider> ProgressionController<S, R> {
    pub fn new(store: S, rewards: R) -> Self {
        Self {
            store,
            rewards,
            locks: SessionLocks::new(),
            pending_rewards: DashMap::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a new session with nothing completed.
    #[instrument(skip(self))]
    pub fn start_session(&self) -> Result<SessionProgress> {
        let session_id = self.store.create().map_err(|e| self.store_failure(e))?;
        let progress = self.store.get(&session_id).map_err(|e| self.store_failure(e))?;
        info!(%session_id, "created game session");
        Ok(progress)
    }

    /// Current snapshot of a session.
    #[instrument(skip(self))]
    pub fn progress(&self, session_id: SessionId) -> Result<SessionProgress> {
        self.locks.with_lock(session_id, || self.load(session_id))
    }

    /// Mark `kind` as completed.
    ///
    /// Idempotent: re-marking a completed game writes nothing and returns
    /// the unchanged snapshot.
    #[instrument(skip(self))]
    pub fn mark_completed(&self, session_id: SessionId, kind: GameKind) -> Result<SessionProgress> {
        self.locks.with_lock(session_id, || {
            let mut progress = self.load(session_id)?;
            if !progress.mark(kind) {
                debug!(%kind, "game already completed");
                return Ok(progress);
            }

            progress.bump_version();
            self.save(&progress)?;

            info!(
                %kind,
                completed = progress.completed_games().count(),
                percentage = progress.progress_percentage(),
                "game completed"
            );
            if progress.state() == ProgressionState::AllComplete {
                info!("all games completed, reward is claimable");
            }
            Ok(progress)
        })
    }

    /// Forward a finished game to `mark_completed` if the player won it.
    ///
    /// Unfinished games, draws and losses leave the session untouched.
    pub fn record_outcome(&self, session_id: SessionId, game: &impl MiniGame) -> Result<SessionProgress> {
        match game.completion() {
            Some(kind) => self.mark_completed(session_id, kind),
            None => {
                debug!(%session_id, kind = %game.kind(), outcome = ?game.outcome(), "outcome does not complete the game");
                self.progress(session_id)
            }
        }
    }

    /// Claim the reward once every game is completed.
    ///
    /// The first claim asks the reward provider for the message, at most once
    /// per session even when the write fails and the claim is retried. Later
    /// claims return the stored message and the original claim time.
    #[instrument(skip(self))]
    pub fn claim_reward(&self, session_id: SessionId) -> Result<RewardClaim> {
        self.locks.with_lock(session_id, || {
            let mut progress = self.load(session_id)?;

            if !progress.all_games_completed() {
                let remaining = progress.remaining_games();
                warn!(?remaining, "reward claimed before all games were completed");
                return Err(QuestError::NotEligible {
                    session_id,
                    remaining,
                });
            }

            if let (Some(message), Some(claimed_at)) =
                (progress.reward_message(), progress.reward_claimed_at())
            {
                debug!("reward already claimed");
                let message = message.to_string();
                self.pending_rewards.remove(&session_id);
                return Ok(RewardClaim {
                    progress,
                    message,
                    claimed_at,
                    newly_claimed: false,
                });
            }

            let message = self
                .pending_rewards
                .entry(session_id)
                .or_insert_with(|| self.rewards.message(&session_id))
                .clone();
            progress.claim(message.clone());
            progress.bump_version();
            self.save(&progress)?;
            self.pending_rewards.remove(&session_id);

            let claimed_at = progress.reward_claimed_at().unwrap_or_else(Utc::now);
            info!(%claimed_at, "final reward claimed");
            Ok(RewardClaim {
                progress,
                message,
                claimed_at,
                newly_claimed: true,
            })
        })
    }

    /// Number of provider messages held for claims that have not been stored.
    #[must_use]
    pub fn pending_rewards(&self) -> usize {
        self.pending_rewards.len()
    }

    fn load(&self, session_id: SessionId) -> Result<SessionProgress> {
        self.store.get(&session_id).map_err(|e| self.store_failure(e))
    }

    fn save(&self, progress: &SessionProgress) -> Result<()> {
        self.store.put(progress).map_err(|e| self.store_failure(e))
    }

    fn store_failure(&self, err: StoreError) -> QuestError {
        let err = QuestError::from(err);
        if err.is_retryable() {
            warn!(error = %err, "session store operation failed");
        }
        err
    }
}
