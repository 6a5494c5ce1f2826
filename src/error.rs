//! Error types for gift-quest.
//!
//! Two layers:
//! - `StoreError`: what a `SessionStore` implementation reports.
//! - `QuestError`: what engines and the progression controller return to callers.
//!
//! Store errors convert into quest errors with `From`, so controller code
//! can use `?` on store calls directly.

use thiserror::Error;

use crate::core::GameKind;
use crate::progress::SessionId;

/// Why a player's input was rejected.
///
/// Rejected input never mutates game or session state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("cell {index} is outside the 3x3 grid")]
    CellOutOfRange { index: usize },

    #[error("cell {index} is already taken")]
    CellOccupied { index: usize },

    #[error("cell {index} was already revealed")]
    AlreadyRevealed { index: usize },

    #[error("it is not the {expected} turn")]
    OutOfTurn { expected: &'static str },

    #[error("the game is already over")]
    GameOver,

    #[error("unknown choice {0:?} (expected rock, paper or scissors)")]
    UnknownChoice(String),

    #[error("unknown game kind {0:?}")]
    UnknownGameKind(String),

    #[error("match rules need 1 <= wins_needed <= max_rounds (got {wins_needed} of {max_rounds})")]
    InvalidMatchRules { max_rounds: u8, wins_needed: u8 },

    #[error("malformed session id {0:?}")]
    MalformedSessionId(String),
}

/// Errors surfaced by engines and the progression controller.
#[derive(Error, Debug)]
pub enum QuestError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("session {session_id} is not eligible for the reward yet ({} game(s) remaining)", .remaining.len())]
    NotEligible {
        session_id: SessionId,
        remaining: Vec<GameKind>,
    },

    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("concurrent update to session {0}")]
    Conflict(SessionId),

    #[error("stored record for session {session_id} is corrupt: {reason}")]
    CorruptRecord { session_id: SessionId, reason: String },
}

impl QuestError {
    /// Whether the caller may retry the same request unchanged.
    ///
    /// Retrying is safe for every mutating operation: completion marks are
    /// idempotent per kind and claims are idempotent after the first success.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuestError::StoreUnavailable(_) | QuestError::Conflict(_))
    }
}

/// Errors reported by a `SessionStore`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no record for session {0}")]
    NotFound(SessionId),

    #[error("version conflict on session {session_id}: expected {expected}, found {found}")]
    Conflict {
        session_id: SessionId,
        expected: u64,
        found: u64,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("record for session {session_id} failed to decode: {reason}")]
    Corrupt { session_id: SessionId, reason: String },
}

impl From<StoreError> for QuestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => QuestError::SessionNotFound(id),
            StoreError::Conflict { session_id, .. } => QuestError::Conflict(session_id),
            StoreError::Unavailable(reason) => QuestError::StoreUnavailable(reason),
            StoreError::Timeout(after) => {
                QuestError::StoreUnavailable(format!("timed out after {after:?}"))
            }
            StoreError::Corrupt { session_id, reason } => {
                QuestError::CorruptRecord { session_id, reason }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QuestError>;
