//! Console session: the interactive loop that lets two people play a
//! [`Game`] by typing moves.
//!
//! [`Session::run`] asks for the player names, prints the board after every
//! accepted move and alternates turns until somebody wins, the game ends in a
//! stalemate, `exit` is typed or the input stream ends. Whose turn it is lives
//! here, not in the engine.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::chess::core::Player;
use crate::chess::game::{Game, TurnOutcome};
use crate::chess::moves::MoveIntent;

const EXIT_COMMAND: &str = "exit";

/// Connects a [`Game`] to a pair of input and output streams.
pub struct Session {
    game: Game,
    player: Player,
}

impl Session {
    /// Creates a session that starts with White to move.
    #[must_use]
    pub const fn new(game: Game) -> Self {
        Self {
            game,
            player: Player::White,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously reads moves from the input stream and writes the game
    /// transcript to the output stream until the game is finished.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] only when reading or writing the streams
    /// fails. Invalid moves are reported to the player and retried.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(output, "Pawns-Only Chess")?;
        let Some(first) = prompt(input, output, "First Player's name:")? else {
            return say_goodbye(output);
        };
        let Some(second) = prompt(input, output, "Second Player's name:")? else {
            return say_goodbye(output);
        };
        writeln!(output, "{}", self.game.board())?;
        loop {
            let name = match self.player {
                Player::White => &first,
                Player::Black => &second,
            };
            let Some(line) = prompt(input, output, &format!("{name}'s turn:"))? else {
                warn!("input ended in the middle of the game");
                break;
            };
            if line == EXIT_COMMAND {
                break;
            }
            match self.game.process_turn(&line, self.player) {
                TurnOutcome::Normal => {
                    writeln!(output, "{}", self.game.board())?;
                    self.player = self.player.opponent();
                },
                TurnOutcome::Invalid => writeln!(output, "{}", self.rejection(&line))?,
                TurnOutcome::Win(winner) => {
                    writeln!(output, "{}", self.game.board())?;
                    writeln!(output)?;
                    writeln!(output, "{winner} Wins!")?;
                    break;
                },
                TurnOutcome::Stalemate => {
                    writeln!(output, "{}", self.game.board())?;
                    writeln!(output, "Stalemate!")?;
                    break;
                },
            }
        }
        say_goodbye(output)
    }

    /// Explains a rejected move: trying to move a pawn the player does not
    /// have gets its own message, everything else is just invalid.
    fn rejection(&self, line: &str) -> String {
        match MoveIntent::parse(line, self.player) {
            Ok(intent)
                if self
                    .game
                    .board()
                    .pawn_on(intent.from())
                    .map_or(true, |pawn| pawn.owner() != self.player) =>
            {
                format!(
                    "No {} pawn at {}",
                    self.player.to_string().to_lowercase(),
                    intent.from()
                )
            },
            _ => "Invalid input".to_owned(),
        }
    }
}

/// Writes the prompt and reads the answer. [`None`] means the input stream has
/// ended.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> anyhow::Result<Option<String>> {
    writeln!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim().to_owned();
    debug!(prompt = message, line = line.as_str(), "read");
    Ok(Some(line))
}

fn say_goodbye(output: &mut impl Write) -> anyhow::Result<()> {
    writeln!(output, "Bye!")?;
    Ok(())
}
