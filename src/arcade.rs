//! One session's set of games.
//!
//! Holds the current round of each game and an independent random stream
//! per game, all derived from `QuestConfig::seed`. Playing one game never
//! shifts the random choices of another, so a whole session replays exactly
//! from its seed and move list.
//!
//! `snapshot` captures every round together with each stream's position;
//! `resume` continues from there with the same random choices the original
//! arcade would have made.
//!
//! ## Usage
//!
//! ```
//! use gift_quest::arcade::Arcade;
//! use gift_quest::core::{GameKind, QuestConfig};
//! use gift_quest::rules::MiniGame;
//!
//! let mut arcade = Arcade::new(&QuestConfig::default());
//! let turn = arcade.play_tic_tac_toe(4).unwrap();
//! assert_eq!(turn.player_move, 4);
//! assert!(arcade.game(GameKind::TicTacToe).completion().is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{GameKind, GameRng, GameRngState, QuestConfig};
use crate::error::Result;
use crate::games::find_the_gift::{FindTheGift, RevealReport};
use crate::games::rock_paper_scissors::{Choice, RoundReport, RpsMatch};
use crate::games::tictactoe::{TicTacToe, TicTacToeTurn};
use crate::rules::MiniGame;

/// The three games of one session, each with its own random stream.
#[derive(Clone, Debug)]
pub struct Arcade {
    tic_tac_toe: TicTacToe,
    tic_tac_toe_rng: GameRng,
    rps: RpsMatch,
    rps_rng: GameRng,
    gift: FindTheGift,
    gift_rng: GameRng,
}

/// Saved position of an `Arcade`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcadeSnapshot {
    pub tic_tac_toe: TicTacToe,
    pub tic_tac_toe_rng: GameRngState,
    pub rock_paper_scissors: RpsMatch,
    pub rock_paper_scissors_rng: GameRngState,
    pub find_the_gift: FindTheGift,
    pub find_the_gift_rng: GameRngState,
}

impl Arcade {
    pub fn new(config: &QuestConfig) -> Self {
        let root = GameRng::new(config.seed);
        let mut gift_rng = root.for_context(GameKind::FindTheGift.as_str());
        let gift = FindTheGift::new(config.gift_attempts, &mut gift_rng);

        Self {
            tic_tac_toe: TicTacToe::new(),
            tic_tac_toe_rng: root.for_context(GameKind::TicTacToe.as_str()),
            rps: RpsMatch::new(config.rps_rules),
            rps_rng: root.for_context(GameKind::RockPaperScissors.as_str()),
            gift,
            gift_rng,
        }
    }

    /// Pick up where a snapshot left off.
    #[must_use]
    pub fn resume(snapshot: &ArcadeSnapshot) -> Self {
        Self {
            tic_tac_toe: snapshot.tic_tac_toe,
            tic_tac_toe_rng: GameRng::from_state(&snapshot.tic_tac_toe_rng),
            rps: snapshot.rock_paper_scissors,
            rps_rng: GameRng::from_state(&snapshot.rock_paper_scissors_rng),
            gift: snapshot.find_the_gift,
            gift_rng: GameRng::from_state(&snapshot.find_the_gift_rng),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ArcadeSnapshot {
        ArcadeSnapshot {
            tic_tac_toe: self.tic_tac_toe,
            tic_tac_toe_rng: self.tic_tac_toe_rng.state(),
            rock_paper_scissors: self.rps,
            rock_paper_scissors_rng: self.rps_rng.state(),
            find_the_gift: self.gift,
            find_the_gift_rng: self.gift_rng.state(),
        }
    }

    #[must_use]
    pub fn tic_tac_toe(&self) -> &TicTacToe {
        &self.tic_tac_toe
    }

    #[must_use]
    pub fn rock_paper_scissors(&self) -> &RpsMatch {
        &self.rps
    }

    #[must_use]
    pub fn find_the_gift(&self) -> &FindTheGift {
        &self.gift
    }

    /// The current round of `kind`, through the shared engine contract.
    #[must_use]
    pub fn game(&self, kind: GameKind) -> &dyn MiniGame {
        match kind {
            GameKind::TicTacToe => &self.tic_tac_toe,
            GameKind::RockPaperScissors => &self.rps,
            GameKind::FindTheGift => &self.gift,
        }
    }

    pub fn play_tic_tac_toe(&mut self, index: usize) -> Result<TicTacToeTurn> {
        let turn = self.tic_tac_toe.play(index, &mut self.tic_tac_toe_rng)?;
        self.tic_tac_toe = turn.state;
        Ok(turn)
    }

    pub fn play_rock_paper_scissors(&mut self, choice: Choice) -> Result<RoundReport> {
        let report = self.rps.play_round(choice, &mut self.rps_rng)?;
        self.rps = report.state;
        Ok(report)
    }

    pub fn reveal_gift(&mut self, index: usize) -> Result<RevealReport> {
        let report = self.gift.reveal(index)?;
        self.gift = report.state;
        Ok(report)
    }

    /// Start a fresh round of `kind`.
    pub fn restart(&mut self, kind: GameKind) {
        match kind {
            GameKind::TicTacToe => self.tic_tac_toe = self.tic_tac_toe.restart(),
            GameKind::RockPaperScissors => self.rps = self.rps.restart(),
            GameKind::FindTheGift => self.gift = self.gift.restart(&mut self.gift_rng),
        }
    }
}
