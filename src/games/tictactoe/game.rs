//! Tic-tac-toe against a fixed-priority opponent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::{Board, Cell, CellList, CELL_COUNT, CENTER, CORNERS};
use crate::core::{GameKind, RandomSource};
use crate::error::{InvalidInput, QuestError};
use crate::rules::{GameOutcome, MiniGame};

/// Whose move it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    Player,
    Opponent,
}

/// Tic-tac-toe round state. The player always moves first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    board: Board,
    turn: Turn,
    outcome: Option<GameOutcome>,
    winning_line: Option<[usize; 3]>,
}

/// Result of `TicTacToe::play`: the player's move and the opponent's reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacToeTurn {
    /// State after both moves.
    pub state: TicTacToe,
    /// Where the player moved.
    pub player_move: usize,
    /// Where the opponent replied, if the game was still open.
    pub opponent_move: Option<usize>,
}

impl TicTacToeTurn {
    /// Terminal outcome after this turn, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome
    }
}

impl TicTacToe {
    /// Fresh board, player to move.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from an existing board with the player to move.
    ///
    /// The outcome is re-evaluated from the board.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
        .evaluated(Turn::Player)
    }

    /// Start over on an empty board.
    #[must_use]
    pub fn restart(&self) -> Self {
        Self::new()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        self.board.cells()
    }

    #[must_use]
    pub fn empty_cells(&self) -> CellList {
        self.board.empty_cells()
    }

    #[must_use]
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// The three cells of the winning line, for highlighting.
    #[must_use]
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.winning_line
    }

    /// Place the player's mark at `index`.
    ///
    /// Fails without changing anything if `index` is off the board, the cell
    /// is taken, the game is over, or the opponent is due to move.
    pub fn apply_player_move(&self, index: usize) -> Result<Self, QuestError> {
        self.check_open(Turn::Player)?;
        match self.board.get(index) {
            None => Err(InvalidInput::CellOutOfRange { index }.into()),
            Some(Cell::Empty) => {
                let next = Self {
                    board: self.board.with(index, Cell::Player),
                    ..*self
                };
                Ok(next.evaluated(Turn::Opponent))
            }
            Some(_) => Err(InvalidInput::CellOccupied { index }.into()),
        }
    }

    /// Let the opponent move. Returns the new state and the chosen cell.
    pub fn apply_opponent_move(
        &self,
        rng: &mut impl RandomSource,
    ) -> Result<(Self, usize), QuestError> {
        self.check_open(Turn::Opponent)?;
        // An open game always has an empty cell.
        let index = compute_opponent_move(&self.board, rng).ok_or(InvalidInput::GameOver)?;
        let next = Self {
            board: self.board.with(index, Cell::Opponent),
            ..*self
        };
        Ok((next.evaluated(Turn::Player), index))
    }

    /// Player move followed by the opponent's reply when the game is still open.
    ///
    /// The returned state is final; any display delay before showing the
    /// reply is up to the caller.
    pub fn play(&self, index: usize, rng: &mut impl RandomSource) -> Result<TicTacToeTurn, QuestError> {
        let after_player = self.apply_player_move(index)?;
        let (state, opponent_move) = if after_player.is_over() {
            (after_player, None)
        } else {
            let (state, reply) = after_player.apply_opponent_move(rng)?;
            (state, Some(reply))
        };

        debug!(
            player_move = index,
            opponent_move = ?opponent_move,
            outcome = ?state.outcome,
            "tic-tac-toe turn"
        );

        Ok(TicTacToeTurn {
            state,
            player_move: index,
            opponent_move,
        })
    }

    fn check_open(&self, expected: Turn) -> Result<(), InvalidInput> {
        if self.outcome.is_some() {
            return Err(InvalidInput::GameOver);
        }
        if self.turn != expected {
            let expected = match expected {
                Turn::Player => "player's",
                Turn::Opponent => "opponent's",
            };
            return Err(InvalidInput::OutOfTurn { expected });
        }
        Ok(())
    }

    /// Settle the outcome after a move, or hand the turn to `next`.
    fn evaluated(mut self, next: Turn) -> Self {
        if let Some((mark, line)) = self.board.winner() {
            self.outcome = Some(if mark == Cell::Player {
                GameOutcome::Won
            } else {
                GameOutcome::Lost
            });
            self.winning_line = Some(line);
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.turn = next;
        }
        self
    }
}

impl MiniGame for TicTacToe {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }
}

/// Choose the opponent's cell.
///
/// Fixed priority, first match wins:
/// 1. Complete three in a row.
/// 2. Block the player's three in a row.
/// 3. Take the centre.
/// 4. Take a random empty corner.
/// 5. Take a random empty cell.
///
/// Returns `None` only for a full board.
pub fn compute_opponent_move(board: &Board, rng: &mut impl RandomSource) -> Option<usize> {
    if let Some(win) = board.completing_move(Cell::Opponent) {
        return Some(win);
    }
    if let Some(block) = board.completing_move(Cell::Player) {
        return Some(block);
    }
    if board.get(CENTER) == Some(Cell::Empty) {
        return Some(CENTER);
    }

    let empty = board.empty_cells();
    let corners: CellList = CORNERS.into_iter().filter(|c| empty.contains(c)).collect();
    rng.choose(&corners).or_else(|| rng.choose(&empty))
}
