//! Quest configuration.
//!
//! Fixes the knobs the games and the progression layer read at startup:
//! - `MatchRules`: best-of length for rock-paper-scissors
//! - `gift_attempts`: guesses allowed in find-the-gift
//! - `seed`: root of every random stream
//! - `reward_message`: what `StaticReward` hands out on claim

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Reward text handed out when no other provider is configured.
pub const DEFAULT_REWARD_MESSAGE: &str =
    "Happy Birthday! You've completed all challenges and earned your special gift!";

/// Length and win threshold of a rock-paper-scissors match.
///
/// Always holds `1 <= wins_needed <= max_rounds`; construct with
/// `best_of` or the checked `new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchRules")]
pub struct MatchRules {
    max_rounds: u8,
    wins_needed: u8,
}

#[derive(Deserialize)]
struct RawMatchRules {
    max_rounds: u8,
    wins_needed: u8,
}

impl TryFrom<RawMatchRules> for MatchRules {
    type Error = InvalidInput;

    fn try_from(raw: RawMatchRules) -> Result<Self, Self::Error> {
        Self::new(raw.max_rounds, raw.wins_needed)
    }
}

impl MatchRules {
    /// Rules with an explicit round cap and win threshold.
    pub fn new(max_rounds: u8, wins_needed: u8) -> Result<Self, InvalidInput> {
        if wins_needed == 0 || wins_needed > max_rounds {
            return Err(InvalidInput::InvalidMatchRules {
                max_rounds,
                wins_needed,
            });
        }
        Ok(Self {
            max_rounds,
            wins_needed,
        })
    }

    /// Best of `rounds`: the match ends as soon as one side holds a majority.
    /// Zero rounds is treated as one.
    #[must_use]
    pub const fn best_of(rounds: u8) -> Self {
        let rounds = if rounds == 0 { 1 } else { rounds };
        Self {
            max_rounds: rounds,
            wins_needed: rounds / 2 + 1,
        }
    }

    /// Hard cap on rounds played.
    #[must_use]
    pub const fn max_rounds(&self) -> u8 {
        self.max_rounds
    }

    /// Round wins that end the match early.
    #[must_use]
    pub const fn wins_needed(&self) -> u8 {
        self.wins_needed
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::best_of(3)
    }
}

/// Configuration for one quest deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    /// Root seed; each game derives its own stream from it.
    pub seed: u64,

    /// Guesses allowed per find-the-gift round.
    pub gift_attempts: u8,

    /// Rock-paper-scissors match rules.
    pub rps_rules: MatchRules,

    /// Message returned by the default reward provider.
    pub reward_message: String,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            gift_attempts: 3,
            rps_rules: MatchRules::default(),
            reward_message: DEFAULT_REWARD_MESSAGE.to_string(),
        }
    }
}

impl QuestConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom number of find-the-gift attempts.
    #[must_use]
    pub fn with_gift_attempts(mut self, attempts: u8) -> Self {
        self.gift_attempts = attempts.max(1);
        self
    }

    /// Create a new config with custom rock-paper-scissors rules.
    #[must_use]
    pub fn with_rps_rules(mut self, rules: MatchRules) -> Self {
        self.rps_rules = rules;
        self
    }

    /// Create a new config with a custom reward message.
    #[must_use]
    pub fn with_reward_message(mut self, message: impl Into<String>) -> Self {
        self.reward_message = message.into();
        self
    }
}
