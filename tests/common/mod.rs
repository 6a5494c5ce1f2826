//! Shared helpers for integration tests.
//!
//! Environment knobs:
//! - `PROPTEST_CASES`: cases per property (default 64)
//! - `RUST_LOG`: log filter when a test calls `init_tracing`

#![allow(dead_code)]

use proptest::prelude::ProptestConfig;
use tracing_subscriber::EnvFilter;

use gift_quest::games::tictactoe::{Cell, CORNERS};
use gift_quest::Arcade;

/// Proptest config honouring `PROPTEST_CASES`.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// Route log output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Beat the tic-tac-toe opponent with a corner fork.
///
/// Player takes corner 0, the opponent answers in the centre, the player
/// takes corner 8, and after the opponent's corner the player takes the
/// remaining corner, which blocks and threatens two lines at once.
pub fn win_tic_tac_toe(arcade: &mut Arcade) {
    arcade.play_tic_tac_toe(0).unwrap();
    let turn = arcade.play_tic_tac_toe(8).unwrap();
    let taken = turn.opponent_move.unwrap();
    let fork = CORNERS
        .into_iter()
        .find(|&c| c != taken && arcade.tic_tac_toe().board().get(c) == Some(Cell::Empty))
        .unwrap();
    arcade.play_tic_tac_toe(fork).unwrap();
    let finish = arcade
        .tic_tac_toe()
        .board()
        .completing_move(Cell::Player)
        .unwrap();
    arcade.play_tic_tac_toe(finish).unwrap();
}

/// Play best-of-three matches with rock until one is won.
pub fn win_rock_paper_scissors(arcade: &mut Arcade) {
    use gift_quest::games::rock_paper_scissors::Choice;
    use gift_quest::rules::{GameOutcome, MiniGame};

    for _ in 0..200 {
        while !arcade.rock_paper_scissors().is_over() {
            arcade.play_rock_paper_scissors(Choice::Rock).unwrap();
        }
        if arcade.rock_paper_scissors().outcome() == Some(GameOutcome::Won) {
            return;
        }
        arcade.restart(gift_quest::GameKind::RockPaperScissors);
    }
    panic!("no rock-paper-scissors win in 200 matches");
}

/// Reveal cells in order, restarting lost rounds, until the gift is found.
pub fn win_find_the_gift(arcade: &mut Arcade) {
    use gift_quest::rules::{GameOutcome, MiniGame};

    for _ in 0..200 {
        let mut index = 0;
        while !arcade.find_the_gift().is_over() {
            arcade.reveal_gift(index).unwrap();
            index += 1;
        }
        if arcade.find_the_gift().outcome() == Some(GameOutcome::Won) {
            return;
        }
        arcade.restart(gift_quest::GameKind::FindTheGift);
    }
    panic!("gift not found in 200 rounds");
}
