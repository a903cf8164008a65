//! Parsing raw move input and classifying it against the rules of pawn
//! movement.
//!
//! Classification is a pure function of the [`Board`] and a [`MoveIntent`]: it
//! never mutates the board and produces a [`Move`] that knows exactly which
//! squares to clear and which pawn to place.

use std::fmt;

use anyhow::bail;
use arrayvec::ArrayVec;

use crate::chess::board::{Board, Pawn};
use crate::chess::core::{Player, Rank, Square};

/// A move as typed by a player: origin and destination squares in
/// [UCI-like] coordinate notation (`e2e4`) and the player making it. It says
/// nothing about legality yet.
///
/// [UCI-like]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    from: Square,
    to: Square,
    player: Player,
}

impl MoveIntent {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Square, to: Square, player: Player) -> Self {
        Self { from, to, player }
    }

    /// Parses exactly two concatenated squares, e.g. `e2e4` or `E7E5`. File
    /// letters are case-insensitive.
    ///
    /// ```
    /// use pawns::chess::core::Player;
    /// use pawns::chess::moves::MoveIntent;
    ///
    /// let intent = MoveIntent::parse("E2e4", Player::White).unwrap();
    /// assert_eq!(intent.to_string(), "e2e4");
    /// assert!(MoveIntent::parse("e2e9", Player::White).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] for anything that is not four characters
    /// forming two valid squares.
    pub fn parse(input: &str, player: Player) -> anyhow::Result<Self> {
        if input.chars().count() != 4 || !input.is_ascii() {
            bail!("move should be two squares, e.g. e2e4, got '{input}'");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(from.try_into()?, to.try_into()?, player))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn player(self) -> Player {
        self.player
    }
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Categories of legal pawn moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// One square straight ahead.
    Advance,
    /// Two squares straight ahead from the home rank. The pawn becomes
    /// capturable [en passant] for one turn.
    ///
    /// [en passant]: https://en.wikipedia.org/wiki/En_passant
    DoubleAdvance,
    /// One square diagonally onto an opponent pawn.
    Capture,
    /// One square diagonally onto an empty square, capturing the opponent pawn
    /// that has just advanced two squares past it.
    EnPassant,
}

/// A classified legal move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    intent: MoveIntent,
    kind: MoveKind,
    captured: Option<Square>,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn intent(self) -> MoveIntent {
        self.intent
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Square of the captured pawn. For en passant captures this is not the
    /// destination square.
    #[must_use]
    pub const fn captured(self) -> Option<Square> {
        self.captured
    }

    /// Squares that have to be cleared when the move is made.
    #[must_use]
    pub fn removals(self) -> ArrayVec<Square, 2> {
        let mut removals = ArrayVec::new();
        if let Some(captured) = self.captured {
            removals.push(captured);
        }
        removals.push(self.intent.from);
        removals
    }

    /// The pawn that ends up on the destination square.
    #[must_use]
    pub const fn placed(self) -> Pawn {
        match self.kind {
            MoveKind::DoubleAdvance => Pawn::double_advanced(self.intent.to, self.intent.player),
            MoveKind::Advance | MoveKind::Capture | MoveKind::EnPassant => {
                Pawn::new(self.intent.to, self.intent.player)
            },
        }
    }

    const fn new(intent: MoveIntent, kind: MoveKind, captured: Option<Square>) -> Self {
        Self {
            intent,
            kind,
            captured,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.intent)
    }
}

/// Decides whether the intent is a legal move on the given board and which
/// [`MoveKind`] it is.
///
/// # Errors
///
/// Returns [`anyhow::Error`] describing why the move is illegal.
pub fn classify(board: &Board, intent: MoveIntent) -> anyhow::Result<Move> {
    let MoveIntent { from, to, player } = intent;
    match board.pawn_on(from) {
        Some(pawn) if pawn.owner() == player => {},
        _ => bail!("no {} pawn at {from}", player.to_string().to_lowercase()),
    }
    let column_difference = from.column() - to.column();
    let forward = player.forward_distance(from, to);
    if column_difference.abs() == 1 && forward == 1 {
        return classify_capture(board, intent);
    }
    if column_difference != 0 {
        bail!("{intent}: pawns can only move straight ahead or capture diagonally");
    }
    if forward <= 0 {
        bail!("{intent}: pawns can only move forward");
    }
    if board.pawn_on(to).is_some() {
        bail!("{intent}: {to} is occupied");
    }
    match forward {
        1 => Ok(Move::new(intent, MoveKind::Advance, None)),
        2 if from.rank() == Rank::home(player) => {
            // Both squares of a double advance have to be free.
            if let Some(skipped) = from.shift(player.push_direction()) {
                if board.pawn_on(skipped).is_some() {
                    bail!("{intent}: can not jump over the pawn on {skipped}");
                }
            }
            Ok(Move::new(intent, MoveKind::DoubleAdvance, None))
        },
        2 => bail!("{intent}: pawns can advance two squares only from rank {}", Rank::home(player)),
        _ => bail!("{intent}: pawns can not advance more than two squares"),
    }
}

fn classify_capture(board: &Board, intent: MoveIntent) -> anyhow::Result<Move> {
    let MoveIntent { from, to, player } = intent;
    if let Some(target) = board.pawn_on(to) {
        if target.owner() == player {
            bail!("{intent}: can not capture own pawn");
        }
        return Ok(Move::new(intent, MoveKind::Capture, Some(to)));
    }
    // En passant: the victim stands right beside the origin, on the file the
    // capturing pawn moves to.
    match board.pawn_at(from.row(), to.column()) {
        Some(victim) if victim.owner() != player && victim.is_en_passant_target() => Ok(Move::new(
            intent,
            MoveKind::EnPassant,
            Some(victim.square()),
        )),
        _ => bail!("{intent}: pawns can not move diagonally without capturing"),
    }
}
