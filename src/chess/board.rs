//! Square-centric board: the set of live pawns, keyed by the square they
//! occupy. [`Board`] answers the geometric questions the move classifier asks
//! and applies the transitions it produces.

use std::fmt::{self, Write};

use anyhow::{bail, Context};

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{
    Direction,
    File,
    Player,
    Rank,
    Square,
    BOARD_SIZE,
    BOARD_WIDTH,
};

/// Number of turn cycles a double-advanced pawn stays capturable en passant.
/// Every processed turn ages all pawns by one, so the counter is still live
/// when the opponent replies and expires before the mover moves again.
pub(crate) const EN_PASSANT_WINDOW: u8 = 2;

/// Upper bound on the number of pawns a player can own.
pub const MAX_PAWNS: u32 = BOARD_WIDTH as u32;

/// A pawn on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pawn {
    square: Square,
    owner: Player,
    en_passant: u8,
}

impl Pawn {
    /// Creates a pawn that can not be captured en passant.
    #[must_use]
    pub const fn new(square: Square, owner: Player) -> Self {
        Self {
            square,
            owner,
            en_passant: 0,
        }
    }

    /// Creates a pawn that has just advanced two squares.
    #[must_use]
    pub const fn double_advanced(square: Square, owner: Player) -> Self {
        Self {
            square,
            owner,
            en_passant: EN_PASSANT_WINDOW,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn owner(self) -> Player {
        self.owner
    }

    /// Remaining turn cycles during which this pawn can be captured en
    /// passant.
    #[must_use]
    pub const fn en_passant(self) -> u8 {
        self.en_passant
    }

    /// True if an opponent pawn standing next to it can capture it en
    /// passant.
    #[must_use]
    pub const fn is_en_passant_target(self) -> bool {
        self.en_passant > 0
    }

    fn age(&mut self) {
        self.en_passant = self.en_passant.saturating_sub(1);
    }
}

/// Which diagonal squares count as a possible capture when deciding whether a
/// player is stalemated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StalemateRule {
    /// Only opponent pawns and the square behind a pawn that can be taken en
    /// passant on the next turn.
    #[default]
    Strict,
    /// Any occupied diagonal square, regardless of the owner.
    Permissive,
}

/// The live pawns of both players. There is at most one pawn per square and
/// every pawn knows its own square.
///
/// [`Board`] implements [`fmt::Display`] as a console grid and can be
/// serialized to and parsed from a pawn-only version of the FEN piece
/// placement field (see [`Board::from_placement`]).
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Pawn>; BOARD_SIZE as usize],
}

impl Board {
    /// A board without any pawns.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Both players have all eight pawns on their home ranks.
    ///
    /// ```
    /// use pawns::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().placement(),
    ///     "8/pppppppp/8/8/8/8/PPPPPPPP/8"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for file in File::ALL {
                board.put(Pawn::new(Square::new(file, Rank::home(player)), player));
            }
        }
        board
    }

    /// Parses the piece placement field of FEN with only pawns allowed: ranks
    /// from the eighth to the first separated by `/`, `P` for White, `p` for
    /// Black and digits for runs of empty squares.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if the placement is malformed, has a pawn of
    /// either player on rank 1 or rank 8, or has more than eight pawns of one
    /// player.
    pub fn from_placement(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        let ranks: Vec<&str> = input.split('/').collect();
        if ranks.len() != usize::from(BOARD_WIDTH) {
            bail!(
                "placement should have {BOARD_WIDTH} ranks, got {}: {input}",
                ranks.len()
            );
        }
        let mut board = Self::empty();
        for (rank, line) in Rank::ALL.iter().rev().zip(ranks) {
            let mut column = 0u8;
            for symbol in line.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    if !(1..=u32::from(BOARD_WIDTH)).contains(&skip) {
                        bail!("empty square run should be within 1..=8, got {skip}");
                    }
                    column += u8::try_from(skip)?;
                    if column > BOARD_WIDTH {
                        bail!("rank {rank} has more than {BOARD_WIDTH} squares");
                    }
                    continue;
                }
                let owner = match symbol {
                    'P' => Player::White,
                    'p' => Player::Black,
                    _ => bail!("placement symbol should be 'P', 'p' or a digit, got '{symbol}'"),
                };
                let file = File::try_from(column)
                    .with_context(|| format!("rank {rank} has more than {BOARD_WIDTH} squares"))?;
                board.put(Pawn::new(Square::new(file, *rank), owner));
                column += 1;
            }
            if column != BOARD_WIDTH {
                bail!("rank {rank} should have {BOARD_WIDTH} squares, got {column}");
            }
        }
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for player in [Player::White, Player::Black] {
            let count = self.count_for(player);
            if count > MAX_PAWNS {
                bail!(
                    "expected <= {MAX_PAWNS} {} pawns, got {count}",
                    player.to_string().to_lowercase()
                );
            }
            for back_rank in [Rank::One, Rank::Eight] {
                if self
                    .occupancy(player)
                    .iter()
                    .any(|square| square.rank() == back_rank)
                {
                    bail!(
                        "{} pawns can not be placed on rank {back_rank}",
                        player.to_string().to_lowercase()
                    );
                }
            }
        }
        Ok(())
    }

    /// Serializes the board into the format accepted by
    /// [`Board::from_placement`].
    #[must_use]
    pub fn placement(&self) -> String {
        let mut result = String::new();
        for rank in Rank::ALL.iter().rev() {
            let mut empty_squares = 0;
            for file in File::ALL {
                match self.pawn_on(Square::new(file, *rank)) {
                    Some(pawn) => {
                        if empty_squares != 0 {
                            result.push_str(&empty_squares.to_string());
                            empty_squares = 0;
                        }
                        result.push(match pawn.owner() {
                            Player::White => 'P',
                            Player::Black => 'p',
                        });
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                result.push_str(&empty_squares.to_string());
            }
            if *rank != Rank::One {
                result.push('/');
            }
        }
        result
    }

    /// Returns the pawn occupying the square at given coordinates. Coordinates
    /// outside of the board never hold a pawn.
    #[must_use]
    pub fn pawn_at(&self, row: i8, column: i8) -> Option<Pawn> {
        Square::from_coordinates(row, column).and_then(|square| self.pawn_on(square))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn pawn_on(&self, square: Square) -> Option<Pawn> {
        self.squares[square.index()]
    }

    /// All pawns from A1 to H8, e.g. for rendering the board.
    pub fn pawns(&self) -> impl Iterator<Item = Pawn> + '_ {
        self.squares.iter().filter_map(|pawn| *pawn)
    }

    /// Removes the pawns standing on `removals` and then places `addition` on
    /// its square. A simple move removes the origin, a capture also removes the
    /// captured pawn.
    pub fn apply(&mut self, removals: &[Square], addition: Pawn) {
        for square in removals {
            self.squares[square.index()] = None;
        }
        self.put(addition);
    }

    /// Decrements the en passant counters of all pawns of both players.
    pub fn age_pawns(&mut self) {
        self.squares.iter_mut().flatten().for_each(Pawn::age);
    }

    /// Number of live pawns of the player.
    #[must_use]
    pub fn count_for(&self, player: Player) -> u32 {
        self.occupancy(player).count()
    }

    /// Squares occupied by the player's pawns.
    #[must_use]
    pub fn occupancy(&self, player: Player) -> Bitboard {
        self.pawns()
            .filter(|pawn| pawn.owner() == player)
            .map(Pawn::square)
            .collect()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.pawns().map(Pawn::square).collect()
    }

    /// Returns true if any pawn of the player has somewhere to go: a free
    /// square straight ahead or a capture target on a forward diagonal. This is
    /// a quick scan rather than a full legality check, `rule` decides what
    /// counts as a capture target.
    #[must_use]
    pub fn can_move(&self, player: Player, rule: StalemateRule) -> bool {
        let pawns = self.occupancy(player);
        let occupied = self.occupied();
        if !(pawns.shift(player.push_direction()) - occupied).is_empty() {
            return true;
        }
        let targets = match rule {
            StalemateRule::Strict => {
                self.occupancy(player.opponent()) | self.fresh_en_passant_squares(player)
            },
            StalemateRule::Permissive => occupied,
        };
        Direction::captures(player)
            .iter()
            .any(|direction| !(pawns.shift(*direction) & targets).is_empty())
    }

    /// Squares the player could move to when capturing en passant on their
    /// next turn: right behind an opponent pawn that has just advanced two
    /// squares. Older eligibility expires before the player gets to move.
    fn fresh_en_passant_squares(&self, player: Player) -> Bitboard {
        self.pawns()
            .filter(|pawn| pawn.owner() != player && pawn.en_passant() >= EN_PASSANT_WINDOW)
            .map(Pawn::square)
            .collect::<Bitboard>()
            .shift(player.push_direction())
    }

    fn put(&mut self, pawn: Pawn) {
        self.squares[pawn.square().index()] = Some(pawn);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Draws the board the way the console game shows it: the eighth rank on
    /// top, `W` and `B` for the pawns of each player.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LINE_SEPARATOR: &str = "  +---+---+---+---+---+---+---+---+";
        writeln!(f, "{LINE_SEPARATOR}")?;
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{rank} |")?;
            for file in File::ALL {
                let marker = self
                    .pawn_on(Square::new(file, *rank))
                    .map_or(' ', |pawn| pawn.owner().marker());
                write!(f, " {marker} |")?;
            }
            f.write_char('\n')?;
            writeln!(f, "{LINE_SEPARATOR}")?;
        }
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.placement())?;
        let targets: Vec<String> = self
            .pawns()
            .filter(|pawn| pawn.is_en_passant_target())
            .map(|pawn| format!("{}:{}", pawn.square(), pawn.en_passant()))
            .collect();
        if !targets.is_empty() {
            write!(f, " en passant {}", targets.join(","))?;
        }
        Ok(())
    }
}
