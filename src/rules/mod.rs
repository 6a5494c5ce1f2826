//! Engine contract for the mini-games.
//!
//! Games implement `MiniGame` to report:
//! - Which game kind they are
//! - Their terminal outcome
//!
//! The progression layer calls into `MiniGame` but never interprets
//! game-specific state directly.

pub mod engine;

pub use engine::{GameOutcome, MiniGame};
