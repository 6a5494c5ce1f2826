//! Core types shared by the games and the progression layer:
//! game kinds, randomness sources, configuration.

pub mod config;
pub mod kind;
pub mod rng;

pub use config::{MatchRules, QuestConfig, DEFAULT_REWARD_MESSAGE};
pub use kind::GameKind;
pub use rng::{GameRng, GameRngState, RandomSource, ReplaySource};
