//! The three mini-game engines.
//!
//! Every engine is a `Copy` value type: moves return a new state and leave
//! the old one untouched, so a rejected move is trivially a no-op.

pub mod find_the_gift;
pub mod rock_paper_scissors;
pub mod tictactoe;

pub use find_the_gift::FindTheGift;
pub use rock_paper_scissors::RpsMatch;
pub use tictactoe::TicTacToe;
