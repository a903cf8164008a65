#![no_main]
use libfuzzer_sys::fuzz_target;
use pawns::chess::board::MAX_PAWNS;
use pawns::chess::core::Player;
use pawns::chess::game::{Game, TurnOutcome};
use pretty_assertions::assert_eq;

// Every line of the input is a turn, players alternate after accepted moves.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let mut game = Game::default();
    let mut player = Player::White;
    for line in input.lines() {
        let before = game.board().clone();
        match game.process_turn(line, player) {
            TurnOutcome::Invalid => assert_eq!(game.board(), &before),
            TurnOutcome::Normal => player = player.opponent(),
            TurnOutcome::Win(_) | TurnOutcome::Stalemate => assert!(game.is_over()),
        }
        assert!(game.board().count_for(Player::White) <= MAX_PAWNS);
        assert!(game.board().count_for(Player::Black) <= MAX_PAWNS);
    }
});
