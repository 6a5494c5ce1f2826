//! Find the gift hidden under one of nine cells with limited attempts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameKind, RandomSource};
use crate::error::{InvalidInput, QuestError};
use crate::rules::{GameOutcome, MiniGame};

/// Cells in the search grid.
pub const GRID_CELLS: usize = 9;

/// Attempts per round unless configured otherwise.
pub const DEFAULT_ATTEMPTS: u8 = 3;

const ALL_REVEALED: u16 = (1 << GRID_CELLS) - 1;

/// What a single reveal turned up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealResult {
    /// The gift was under this cell; the round is won.
    Found,
    /// Empty cell, attempts remain.
    Miss { attempts_left: u8 },
    /// Empty cell and no attempts left; the round is lost and the grid uncovered.
    OutOfAttempts,
}

/// Search round state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindTheGift {
    target: u8,
    attempts: u8,
    attempts_left: u8,
    revealed: u16,
    outcome: Option<GameOutcome>,
}

/// Result of `FindTheGift::reveal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealReport {
    /// Round state after the reveal.
    pub state: FindTheGift,
    /// The cell revealed.
    pub index: usize,
    pub result: RevealResult,
}

impl FindTheGift {
    /// New round with the gift under a uniformly random cell.
    pub fn new(attempts: u8, rng: &mut impl RandomSource) -> Self {
        let target = rng.pick(GRID_CELLS) as u8;
        Self::with_target(target as usize, attempts)
    }

    /// New round with a known target. `target` is clamped onto the grid.
    #[must_use]
    pub fn with_target(target: usize, attempts: u8) -> Self {
        let attempts = attempts.max(1);
        Self {
            target: target.min(GRID_CELLS - 1) as u8,
            attempts,
            attempts_left: attempts,
            revealed: 0,
            outcome: None,
        }
    }

    /// Fresh round: new independent target, full attempts, nothing revealed.
    pub fn restart(&self, rng: &mut impl RandomSource) -> Self {
        Self::new(self.attempts, rng)
    }

    #[must_use]
    pub fn attempts_left(&self) -> u8 {
        self.attempts_left
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        index < GRID_CELLS && self.revealed & (1 << index) != 0
    }

    /// Revealed cell indices, ascending.
    pub fn revealed_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..GRID_CELLS).filter(|&i| self.is_revealed(i))
    }

    /// Where the gift was. Hidden until the round is over.
    #[must_use]
    pub fn target(&self) -> Option<usize> {
        self.outcome.map(|_| self.target as usize)
    }

    /// Uncover `index`.
    ///
    /// Fails without changing anything if `index` is off the grid, already
    /// revealed, or the round is over.
    pub fn reveal(&self, index: usize) -> Result<RevealReport, QuestError> {
        if self.outcome.is_some() {
            return Err(InvalidInput::GameOver.into());
        }
        if index >= GRID_CELLS {
            return Err(InvalidInput::CellOutOfRange { index }.into());
        }
        if self.is_revealed(index) {
            return Err(InvalidInput::AlreadyRevealed { index }.into());
        }

        let mut next = *self;
        next.revealed |= 1 << index;

        let result = if index == self.target as usize {
            next.outcome = Some(GameOutcome::Won);
            RevealResult::Found
        } else {
            next.attempts_left = next.attempts_left.saturating_sub(1);
            if next.attempts_left == 0 {
                next.outcome = Some(GameOutcome::Lost);
                next.revealed = ALL_REVEALED;
                RevealResult::OutOfAttempts
            } else {
                RevealResult::Miss {
                    attempts_left: next.attempts_left,
                }
            }
        };

        debug!(index, ?result, attempts_left = next.attempts_left, "find-the-gift reveal");

        Ok(RevealReport {
            state: next,
            index,
            result,
        })
    }
}

impl MiniGame for FindTheGift {
    fn kind(&self) -> GameKind {
        GameKind::FindTheGift
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }
}
