//! The three game kinds a session must complete.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InvalidInput;

/// Identifier of one of the three required games.
///
/// Ordered so completed-game sets iterate in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameKind {
    TicTacToe,
    RockPaperScissors,
    FindTheGift,
}

impl GameKind {
    /// Every kind a session must complete, in canonical order.
    pub const ALL: [GameKind; 3] = [
        GameKind::TicTacToe,
        GameKind::RockPaperScissors,
        GameKind::FindTheGift,
    ];

    /// Stable wire name, used in serialized records and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "TIC_TAC_TOE",
            GameKind::RockPaperScissors => "ROCK_PAPER_SCISSORS",
            GameKind::FindTheGift => "FIND_THE_GIFT",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| InvalidInput::UnknownGameKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        for kind in GameKind::ALL {
            assert_eq!(kind.as_str().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("find-the-gift".parse::<GameKind>(), Ok(GameKind::FindTheGift));
        assert_eq!(
            "chess".parse::<GameKind>(),
            Err(InvalidInput::UnknownGameKind("chess".into()))
        );
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&GameKind::RockPaperScissors).unwrap();
        assert_eq!(json, "\"ROCK_PAPER_SCISSORS\"");

        let kind: GameKind = serde_json::from_str("\"TIC_TAC_TOE\"").unwrap();
        assert_eq!(kind, GameKind::TicTacToe);
    }

    #[test]
    fn test_canonical_order() {
        let mut kinds = vec![GameKind::FindTheGift, GameKind::TicTacToe, GameKind::RockPaperScissors];
        kinds.sort();
        assert_eq!(kinds, GameKind::ALL.to_vec());
    }
}
