//! Find the gift: one hidden cell out of nine, three guesses.

mod game;

pub use game::{FindTheGift, RevealReport, RevealResult, DEFAULT_ATTEMPTS, GRID_CELLS};
