//! Rock-paper-scissors, best of three.
//!
//! The match ends as soon as either side reaches two round wins, or after
//! the third round. Only a finished match with the player strictly ahead
//! completes the game; ties and losses call for a fresh match.

mod game;

pub use game::{round_winner, Choice, RoundRecord, RoundReport, RoundWinner, RpsMatch};
