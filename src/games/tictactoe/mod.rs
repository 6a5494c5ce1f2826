//! Tic-tac-toe: the player (first to move) against a heuristic opponent.
//!
//! - The player must win outright; draws and losses allow a restart
//!   but never complete the game.
//! - The opponent wins when it can, blocks when it must, then prefers
//!   the centre, a random corner, and finally any random cell.

mod board;
mod game;

pub use board::{Board, Cell, CellList, CELL_COUNT, CENTER, CORNERS, LINES};
pub use game::{compute_opponent_move, TicTacToe, TicTacToeTurn, Turn};
