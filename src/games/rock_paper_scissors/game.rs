//! Best-of-three rock-paper-scissors match.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::core::{GameKind, MatchRules, RandomSource};
use crate::error::{InvalidInput, QuestError};
use crate::rules::{GameOutcome, MiniGame};

/// A hand shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Cyclic dominance: rock > scissors > paper > rock.
    #[must_use]
    pub const fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    /// Draw a choice uniformly, independent of anything else.
    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.pick(Self::ALL.len())]
    }
}

impl FromStr for Choice {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            _ => Err(InvalidInput::UnknownChoice(s.to_string())),
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Choice::Rock => "rock",
            Choice::Paper => "paper",
            Choice::Scissors => "scissors",
        };
        f.write_str(name)
    }
}

/// Who took a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundWinner {
    Player,
    Opponent,
    Draw,
}

/// Adjudicate one round.
#[must_use]
pub fn round_winner(player: Choice, opponent: Choice) -> RoundWinner {
    if player == opponent {
        RoundWinner::Draw
    } else if player.beats(opponent) {
        RoundWinner::Player
    } else {
        RoundWinner::Opponent
    }
}

/// One played round, kept for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub player: Choice,
    pub opponent: Choice,
    pub winner: RoundWinner,
}

/// Match state: scores, rounds played, and the outcome once decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsMatch {
    rules: MatchRules,
    rounds_played: u8,
    player_score: u8,
    opponent_score: u8,
    last_round: Option<RoundRecord>,
    outcome: Option<GameOutcome>,
}

/// Result of `RpsMatch::play_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// Match state after the round.
    pub state: RpsMatch,
    /// The round just played.
    pub round: RoundRecord,
}

impl RoundReport {
    #[must_use]
    pub fn opponent_choice(&self) -> Choice {
        self.round.opponent
    }

    #[must_use]
    pub fn round_winner(&self) -> RoundWinner {
        self.round.winner
    }
}

impl Default for RpsMatch {
    fn default() -> Self {
        Self::new(MatchRules::default())
    }
}

impl RpsMatch {
    /// Fresh match: round 1, both scores zero.
    #[must_use]
    pub fn new(rules: MatchRules) -> Self {
        Self {
            rules,
            rounds_played: 0,
            player_score: 0,
            opponent_score: 0,
            last_round: None,
            outcome: None,
        }
    }

    /// Fresh match under the same rules.
    #[must_use]
    pub fn restart(&self) -> Self {
        Self::new(self.rules)
    }

    #[must_use]
    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    /// Current round number, starting at 1. Stays on the last round once the
    /// match is over.
    #[must_use]
    pub fn round(&self) -> u8 {
        if self.outcome.is_some() {
            self.rounds_played.max(1)
        } else {
            self.rounds_played + 1
        }
    }

    #[must_use]
    pub fn rounds_played(&self) -> u8 {
        self.rounds_played
    }

    #[must_use]
    pub fn player_score(&self) -> u8 {
        self.player_score
    }

    #[must_use]
    pub fn opponent_score(&self) -> u8 {
        self.opponent_score
    }

    #[must_use]
    pub fn last_round(&self) -> Option<RoundRecord> {
        self.last_round
    }

    /// Play one round against a uniformly random opponent choice.
    pub fn play_round(
        &self,
        choice: Choice,
        rng: &mut impl RandomSource,
    ) -> Result<RoundReport, QuestError> {
        let opponent = Choice::random(rng);
        self.resolve_round(choice, opponent)
    }

    /// Play one round with both choices fixed.
    pub fn resolve_round(&self, player: Choice, opponent: Choice) -> Result<RoundReport, QuestError> {
        if self.outcome.is_some() {
            return Err(InvalidInput::GameOver.into());
        }

        let winner = round_winner(player, opponent);
        let round = RoundRecord {
            player,
            opponent,
            winner,
        };

        let mut next = *self;
        next.rounds_played += 1;
        match winner {
            RoundWinner::Player => next.player_score += 1,
            RoundWinner::Opponent => next.opponent_score += 1,
            RoundWinner::Draw => {}
        }
        next.last_round = Some(round);
        next.outcome = next.settle();

        debug!(
            round = next.rounds_played,
            %player,
            %opponent,
            ?winner,
            player_score = next.player_score,
            opponent_score = next.opponent_score,
            "rock-paper-scissors round"
        );

        Ok(RoundReport { state: next, round })
    }

    /// Decide the match once a side reaches the win threshold or the rounds run out.
    fn settle(&self) -> Option<GameOutcome> {
        let decided = self.player_score >= self.rules.wins_needed()
            || self.opponent_score >= self.rules.wins_needed()
            || self.rounds_played >= self.rules.max_rounds();
        if !decided {
            return None;
        }
        Some(match self.player_score.cmp(&self.opponent_score) {
            std::cmp::Ordering::Greater => GameOutcome::Won,
            std::cmp::Ordering::Less => GameOutcome::Lost,
            std::cmp::Ordering::Equal => GameOutcome::Draw,
        })
    }
}

impl MiniGame for RpsMatch {
    fn kind(&self) -> GameKind {
        GameKind::RockPaperScissors
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }
}
