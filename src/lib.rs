//! # gift-quest
//!
//! Three small puzzles gating a final reward.
//!
//! ## Design Principles
//!
//! 1. **Engines Are Values**: Each game state is a small `Copy` value.
//!    Moves return the next state; a rejected move leaves nothing changed.
//!
//! 2. **Injected Randomness**: Every random choice goes through
//!    `RandomSource`, so games replay exactly from a seed or a scripted
//!    sequence of picks.
//!
//! 3. **Progression Owns Persistence**: Engines never touch the store. The
//!    progression controller is the only writer of session records, and it
//!    serializes writes per session.
//!
//! ## Modules
//!
//! - `core`: Game kinds, random sources, configuration
//! - `rules`: `MiniGame` contract and `GameOutcome`
//! - `games`: Tic-tac-toe, rock-paper-scissors, find-the-gift
//! - `progress`: Session records, store contract, reward provider, controller
//! - `arcade`: One session's three games with independent random streams
//! - `error`: Error taxonomy

pub mod arcade;
pub mod core;
pub mod error;
pub mod games;
pub mod progress;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameKind, GameRng, MatchRules, QuestConfig, RandomSource};

pub use crate::error::{InvalidInput, QuestError, Result, StoreError};

pub use crate::rules::{GameOutcome, MiniGame};

pub use crate::games::{FindTheGift, RpsMatch, TicTacToe};

pub use crate::progress::{
    InMemorySessionStore, ProgressionController, ProgressionState, RewardClaim,
    RewardContentProvider, SessionId, SessionProgress, SessionStore, StaticReward,
};

pub use crate::arcade::{Arcade, ArcadeSnapshot};
