//! Session progress record.
//!
//! ## SessionProgress
//!
//! One record per session:
//! - Which of the three games are completed
//! - Whether the reward was claimed, and the message handed out
//! - A version counter for optimistic writes
//! - When it was created, last written, and claimed
//!
//! ## Invariants
//!
//! - `reward_claimed` implies every game is completed
//! - `reward_claimed` never goes back to false
//! - Each game kind appears at most once
//! - `reward_claimed_at` is set exactly when `reward_claimed` is, and never moves

use chrono::{DateTime, Utc};
use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::core::GameKind;
use crate::error::InvalidInput;

/// Opaque session identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| InvalidInput::MalformedSessionId(s.to_string()))
    }
}

/// Where a session stands in the progression state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressionState {
    /// No game completed yet.
    NotStarted,
    /// Some, but not all, games completed.
    InProgress,
    /// Every game completed; the reward can be claimed.
    AllComplete,
    /// Reward claimed. Terminal.
    Claimed,
}

/// Progress of one session through the three games.
///
/// Uses an `im` ordered set so snapshots clone in O(1) and compare and
/// serialize deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    session_id: SessionId,
    completed_games: OrdSet<GameKind>,
    reward_claimed: bool,
    reward_message: Option<String>,
    reward_claimed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl SessionProgress {
    /// Empty record for a new session.
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            completed_games: OrdSet::new(),
            reward_claimed: false,
            reward_message: None,
            reward_claimed_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Completed game kinds, in canonical order.
    pub fn completed_games(&self) -> impl Iterator<Item = GameKind> + '_ {
        self.completed_games.iter().copied()
    }

    #[must_use]
    pub fn is_completed(&self, kind: GameKind) -> bool {
        self.completed_games.contains(&kind)
    }

    /// True iff all three kinds are completed.
    #[must_use]
    pub fn all_games_completed(&self) -> bool {
        GameKind::ALL.iter().all(|kind| self.completed_games.contains(kind))
    }

    /// Kinds still to complete, in canonical order.
    #[must_use]
    pub fn remaining_games(&self) -> Vec<GameKind> {
        GameKind::ALL
            .into_iter()
            .filter(|kind| !self.completed_games.contains(kind))
            .collect()
    }

    /// Whole-number share of games completed: 0, 33, 66 or 100.
    #[must_use]
    pub fn progress_percentage(&self) -> u8 {
        (self.completed_games.len() * 100 / GameKind::ALL.len()) as u8
    }

    #[must_use]
    pub fn reward_claimed(&self) -> bool {
        self.reward_claimed
    }

    /// The message handed out at claim time.
    #[must_use]
    pub fn reward_message(&self) -> Option<&str> {
        self.reward_message.as_deref()
    }

    /// When the reward was first claimed.
    #[must_use]
    pub fn reward_claimed_at(&self) -> Option<DateTime<Utc>> {
        self.reward_claimed_at
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last persisted change.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Write counter; bumped by every persisted change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn state(&self) -> ProgressionState {
        if self.reward_claimed {
            ProgressionState::Claimed
        } else if self.all_games_completed() {
            ProgressionState::AllComplete
        } else if self.completed_games.is_empty() {
            ProgressionState::NotStarted
        } else {
            ProgressionState::InProgress
        }
    }

    /// Record `kind` as completed. Returns `false` if it already was.
    pub(crate) fn mark(&mut self, kind: GameKind) -> bool {
        self.completed_games.insert(kind).is_none()
    }

    /// Record the claim. Callers check eligibility first.
    pub(crate) fn claim(&mut self, message: String) {
        debug_assert!(self.all_games_completed());
        self.reward_claimed = true;
        self.reward_message = Some(message);
        if self.reward_claimed_at.is_none() {
            self.reward_claimed_at = Some(Utc::now());
        }
    }

    /// Prepare the record for its next write.
    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}
