//! Shared contract for the mini-game engines.
//!
//! Each engine is a value type advanced by pure transition functions.
//! This trait only exposes what the progression layer and the
//! presentation layer need to read back:
//! - Which game this is
//! - Whether the round is over, and how it ended
//! - Whether that ending counts as completion

use serde::{Deserialize, Serialize};

use crate::core::GameKind;

/// How a finished round ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The player won.
    Won,
    /// The opponent won, or the player ran out of attempts.
    Lost,
    /// Nobody won.
    Draw,
}

impl GameOutcome {
    /// Only a player win advances progression.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, GameOutcome::Won)
    }
}

/// Engine contract read by the progression controller.
pub trait MiniGame {
    /// Which of the three games this engine plays.
    fn kind(&self) -> GameKind;

    /// The terminal outcome, or `None` while the round is still open.
    fn outcome(&self) -> Option<GameOutcome>;

    // === Convenience Methods ===

    /// Has the round reached a terminal state?
    fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// The completion event to emit, if any.
    ///
    /// Draws and losses end the round but never complete the game.
    fn completion(&self) -> Option<GameKind> {
        self.outcome()
            .filter(|outcome| outcome.is_win())
            .map(|_| self.kind())
    }
}
