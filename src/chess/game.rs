//! Turn processing: the only way to change the state of a [`Game`].
//!
//! A turn is processed as one atomic step: the raw input is parsed, the en
//! passant counters are aged, the move is classified and applied, and the
//! resulting position is checked for the end of the game. Until the very last
//! step everything happens on a copy of the board, so a rejected move is never
//! visible to the caller.

use tracing::{debug, info, trace};

use crate::chess::board::{Board, StalemateRule};
use crate::chess::core::{Player, Rank};
use crate::chess::moves::{self, Move, MoveIntent};

/// Variations of the rules the engine can be configured with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    /// How the stalemate scan treats occupied diagonal squares.
    pub stalemate: StalemateRule,
}

/// What happened after a processed turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The move was made and the game continues.
    Normal,
    /// The move was made and won the game for the given player.
    Win(Player),
    /// The input was malformed or the move is illegal. Nothing changed and the
    /// same player should try again.
    Invalid,
    /// The move was made and one of the players has no moves left.
    Stalemate,
}

impl TurnOutcome {
    /// True if no further turns can be played.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win(_) | Self::Stalemate)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Self::Win(player) => Some(player),
            Self::Normal | Self::Invalid | Self::Stalemate => None,
        }
    }
}

/// State of a single game: the board, the rules it is played by and the
/// result once it is decided.
///
/// The game does not track whose turn it is: callers pass the acting player to
/// [`Game::process_turn`] and only advance to the other player when the turn
/// was not [`TurnOutcome::Invalid`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    rules: Rules,
    result: Option<TurnOutcome>,
}

impl Game {
    /// Starts a new game from the standard starting position.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self::from_board(Board::starting(), rules)
    }

    /// Starts a game from an arbitrary position.
    #[must_use]
    pub const fn from_board(board: Board, rules: Rules) -> Self {
        Self {
            board,
            rules,
            result: None,
        }
    }

    /// Read-only view of the current position.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn rules(&self) -> Rules {
        self.rules
    }

    /// The player who won the game, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.result.and_then(TurnOutcome::winner)
    }

    /// True once a turn ended the game with a win or a stalemate.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Plays one turn for `player` given their raw input, e.g. `e2e4`.
    ///
    /// ```
    /// use pawns::chess::core::Player;
    /// use pawns::chess::game::{Game, Rules, TurnOutcome};
    ///
    /// let mut game = Game::new(Rules::default());
    /// assert_eq!(game.process_turn("e2e4", Player::White), TurnOutcome::Normal);
    /// assert_eq!(game.process_turn("e2e4", Player::Black), TurnOutcome::Invalid);
    /// assert_eq!(game.process_turn("d7d5", Player::Black), TurnOutcome::Normal);
    /// assert_eq!(game.process_turn("e4d5", Player::White), TurnOutcome::Normal);
    /// ```
    pub fn process_turn(&mut self, input: &str, player: Player) -> TurnOutcome {
        if self.is_over() {
            debug!(%player, input, "the game is already over");
            return TurnOutcome::Invalid;
        }
        let intent = match MoveIntent::parse(input, player) {
            Ok(intent) => intent,
            Err(e) => {
                debug!(%player, input, "malformed move: {e:#}");
                return TurnOutcome::Invalid;
            },
        };
        let mut next = self.board.clone();
        next.age_pawns();
        let next_move = match moves::classify(&next, intent) {
            Ok(next_move) => next_move,
            Err(e) => {
                debug!(%player, input, "illegal move: {e:#}");
                return TurnOutcome::Invalid;
            },
        };
        next.apply(&next_move.removals(), next_move.placed());
        trace!(%player, %next_move, kind = ?next_move.kind(), board = ?next, "move made");
        self.board = next;

        let outcome = self.evaluate(next_move);
        if outcome.is_terminal() {
            info!(?outcome, "game over");
            self.result = Some(outcome);
        }
        outcome
    }

    /// Checks the position after `last_move` for the end of the game. The
    /// order matters: a pawn reaching the last rank wins even if the opponent
    /// is left without moves.
    fn evaluate(&self, last_move: Move) -> TurnOutcome {
        let mover = last_move.intent().player();
        let opponent = mover.opponent();
        if last_move.intent().to().rank() == Rank::promotion(mover) {
            return TurnOutcome::Win(mover);
        }
        if self.board.count_for(opponent) == 0 {
            return TurnOutcome::Win(mover);
        }
        let stalemate = self.rules.stalemate;
        if !self.board.can_move(opponent, stalemate) || !self.board.can_move(mover, stalemate) {
            return TurnOutcome::Stalemate;
        }
        TurnOutcome::Normal
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::board::Pawn;
    use crate::chess::core::Square;

    fn setup(placement: &str) -> Game {
        Game::from_board(
            Board::from_placement(placement).expect("valid placement"),
            Rules::default(),
        )
    }

    fn play(game: &mut Game, turns: &[(&str, Player)]) {
        for (input, player) in turns {
            assert_eq!(
                game.process_turn(input, *player),
                TurnOutcome::Normal,
                "{player} {input}"
            );
        }
    }

    #[test]
    fn invalid_turns_do_not_change_anything() {
        let mut game = Game::default();
        play(&mut game, &[("b2b4", Player::White)]);
        let before = game.board().clone();
        for input in ["", "b4", "b4b6", "b4a5", "b7b8", "a2a1", "c7c5", "zzzz"] {
            assert_eq!(game.process_turn(input, Player::White), TurnOutcome::Invalid);
            assert_eq!(game.board(), &before, "{input}");
        }
        // Black's failed attempts do not use up the en passant window either.
        assert_eq!(game.process_turn("b7b4", Player::Black), TurnOutcome::Invalid);
        assert_eq!(
            game.board().pawn_on(Square::try_from("b4").unwrap()).map(Pawn::en_passant),
            Some(2)
        );
    }

    #[test]
    fn en_passant_window() {
        let mut game = setup("8/7p/8/8/1p6/8/P6P/8");
        play(&mut game, &[("a2a4", Player::White)]);
        let mut replied = game.clone();
        play(&mut replied, &[("b4a3", Player::Black)]);
        assert_eq!(replied.board().placement(), "8/7p/8/8/8/p7/7P/8");

        play(&mut game, &[("h7h6", Player::Black), ("h2h3", Player::White)]);
        assert_eq!(game.process_turn("b4a3", Player::Black), TurnOutcome::Invalid);
    }

    #[test]
    fn win_by_reaching_last_rank() {
        let mut game = setup("8/1P5p/8/8/8/8/7P/8");
        assert_eq!(
            game.process_turn("b7b8", Player::White),
            TurnOutcome::Win(Player::White)
        );
        assert_eq!(game.winner(), Some(Player::White));
        assert!(game.is_over());
        assert_eq!(game.process_turn("h7h6", Player::Black), TurnOutcome::Invalid);

        let mut game = setup("8/7p/8/8/8/8/p6P/8");
        assert_eq!(
            game.process_turn("a2a1", Player::Black),
            TurnOutcome::Win(Player::Black)
        );
    }

    #[test]
    fn win_by_capturing_everything() {
        let mut game = setup("8/8/8/8/3p4/4P3/8/8");
        assert_eq!(
            game.process_turn("e3d4", Player::White),
            TurnOutcome::Win(Player::White)
        );
        assert_eq!(game.board().count_for(Player::Black), 0);
    }

    #[test]
    fn win_beats_stalemate() {
        // After b7b8 Black's only pawn is blocked, the win is reported first.
        let mut game = setup("8/1P6/8/8/p7/P7/8/8");
        assert_eq!(
            game.process_turn("b7b8", Player::White),
            TurnOutcome::Win(Player::White)
        );
    }

    #[test]
    fn stalemate() {
        let mut game = setup("8/8/8/p7/8/P7/8/8");
        assert_eq!(game.process_turn("a3a4", Player::White), TurnOutcome::Stalemate);
        assert!(game.is_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn self_stalemate() {
        // White blocks its last free pawn while Black still has moves.
        let mut game = setup("8/8/p7/8/7p/P7/8/8");
        assert_eq!(game.process_turn("a3a4", Player::White), TurnOutcome::Normal);
        assert_eq!(game.process_turn("a6a5", Player::Black), TurnOutcome::Stalemate);
    }

    #[test]
    fn stalemate_rule_changes_outcome() {
        // White b3 ends up with only its own pawn on the diagonal.
        let placement = "8/8/8/p7/1p6/PP6/8/8";
        let mut strict = setup(placement);
        assert_eq!(strict.process_turn("a3a4", Player::White), TurnOutcome::Stalemate);

        let mut permissive = Game::from_board(
            Board::from_placement(placement).unwrap(),
            Rules {
                stalemate: StalemateRule::Permissive,
            },
        );
        assert_eq!(permissive.rules().stalemate, StalemateRule::Permissive);
        assert_eq!(permissive.process_turn("a3a4", Player::White), TurnOutcome::Normal);
    }

    #[test]
    fn en_passant_prevents_stalemate() {
        // Black a4 is blocked, but can take b2-b4 en passant.
        let mut game = setup("8/8/8/8/p7/P7/1P6/8");
        assert_eq!(game.process_turn("b2b4", Player::White), TurnOutcome::Normal);
        assert_eq!(game.process_turn("a4b3", Player::Black), TurnOutcome::Normal);
        assert_eq!(game.board().placement(), "8/8/8/8/8/Pp6/8/8");
    }
}
