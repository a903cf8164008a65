//! Board geometry and the two sides, commonly used within [`crate::chess`].

use std::fmt;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A square of the board: a (row, column) pair with both coordinates in
/// `0..BOARD_WIDTH`. Squares are numbered from left to right, from bottom to
/// the top:
///
/// ```
/// use pawns::chess::core::{File, Rank, Square};
///
/// assert_eq!(Square::new(File::A, Rank::One).index(), 0);
/// assert_eq!(Square::new(File::E, Rank::One).index(), 4);
/// assert_eq!(Square::new(File::A, Rank::Four).index(), 8 * 3);
/// assert_eq!(Square::new(File::H, Rank::Eight).index(), 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use pawns::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    index: u8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self {
            index: file as u8 + (rank as u8) * BOARD_WIDTH,
        }
    }

    /// Creates a square from signed coordinates. Anything outside of the board
    /// is [`None`], which makes bounds checks implicit for the callers.
    ///
    /// ```
    /// use pawns::chess::core::Square;
    ///
    /// assert_eq!(Square::from_coordinates(3, 4).unwrap().to_string(), "e4");
    /// assert_eq!(Square::from_coordinates(-1, 4), None);
    /// assert_eq!(Square::from_coordinates(0, 8), None);
    /// ```
    #[must_use]
    pub fn from_coordinates(row: i8, column: i8) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let column = u8::try_from(column).ok()?;
        Some(Self::new(
            File::try_from(column).ok()?,
            Rank::try_from(row).ok()?,
        ))
    }

    /// Position of the square in `0..BOARD_SIZE`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        File::ALL[(self.index % BOARD_WIDTH) as usize]
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.index / BOARD_WIDTH) as usize]
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> i8 {
        self.rank() as i8
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn column(self) -> i8 {
        self.file() as i8
    }

    /// Moves one step in the given direction, [`None`] if that leaves the
    /// board.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (d_row, d_column) = direction.delta();
        Self::from_coordinates(self.row() + d_row, self.column() + d_column)
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        const MAX_INDEX: u8 = BOARD_SIZE - 1;
        match square_index {
            0..=MAX_INDEX => Ok(Self {
                index: square_index,
            }),
            _ => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses a square in algebraic notation (`e4`). The file letter is
    /// case-insensitive.
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            )
        };
        Ok(Self::new(
            file.to_ascii_lowercase().try_into()?,
            rank.try_into()?,
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files from left to right.
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(b'a' + *self as u8))
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(Self::ALL[file as usize - 'a' as usize]),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(usize::from(column)) {
            Some(file) => Ok(*file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// All ranks from bottom to top.
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// The rank player's pawns start on. Only pawns standing on it can advance
    /// two squares at once.
    #[must_use]
    pub const fn home(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The opponent's back rank: reaching it wins the game.
    #[must_use]
    pub const fn promotion(player: Player) -> Self {
        match player {
            Player::White => Self::Eight,
            Player::Black => Self::One,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(Self::ALL[rank as usize - '1' as usize]),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(usize::from(row)) {
            Some(rank) => Ok(*rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A game of Pawns-Only chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// White pawns move up the board, Black pawns move down.
    #[must_use]
    pub const fn push_direction(self) -> Direction {
        match self {
            Self::White => Direction::Up,
            Self::Black => Direction::Down,
        }
    }

    /// Row difference of a move as seen by this player: a single step forward
    /// is always `+1`.
    #[must_use]
    pub const fn forward_distance(self, from: Square, to: Square) -> i8 {
        match self {
            Self::White => to.row() - from.row(),
            Self::Black => from.row() - to.row(),
        }
    }

    /// Single-character marker used when rendering the board.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Directions on the board from a perspective of White player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Right,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    /// Row and column offsets of a single step.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (1, -1),
            Self::Up => (1, 0),
            Self::UpRight => (1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (-1, -1),
            Self::Down => (-1, 0),
            Self::DownRight => (-1, 1),
        }
    }

    /// Diagonal steps a pawn of the given player captures along.
    #[must_use]
    pub const fn captures(player: Player) -> [Self; 2] {
        match player {
            Player::White => [Self::UpLeft, Self::UpRight],
            Player::Black => [Self::DownLeft, Self::DownRight],
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('0'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| Rank::try_from(idx).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '9'")]
    fn rank_from_incorrect_char() {
        let _ = Rank::try_from('9').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        let _ = Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| File::try_from(idx).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'i'")]
    fn file_from_incorrect_char() {
        let _ = File::try_from('i').unwrap();
    }

    #[test]
    fn square() {
        let squares: Vec<_> = [0u8, BOARD_SIZE - 1, BOARD_WIDTH - 1, BOARD_WIDTH, BOARD_SIZE]
            .iter()
            .filter_map(|square| Square::try_from(*square).ok())
            .map(|square| square.to_string())
            .collect();
        assert_eq!(squares, vec!["a1", "h8", "h1", "a2"]);

        let square = Square::try_from("F3").unwrap();
        assert_eq!(square, Square::new(File::F, Rank::Three));
        assert_eq!((square.row(), square.column()), (2, 5));
    }

    #[test]
    #[should_panic(expected = "square should be two-char, got e10 with 3 chars")]
    fn square_from_long_input() {
        let _ = Square::try_from("e10").unwrap();
    }

    #[test]
    fn shift_within_board() {
        let square = Square::try_from("e4").unwrap();
        let shifted = |direction| square.shift(direction).map(|s| s.to_string());
        assert_eq!(shifted(Direction::Up).as_deref(), Some("e5"));
        assert_eq!(shifted(Direction::UpLeft).as_deref(), Some("d5"));
        assert_eq!(shifted(Direction::UpRight).as_deref(), Some("f5"));
        assert_eq!(shifted(Direction::Left).as_deref(), Some("d4"));
        assert_eq!(shifted(Direction::Right).as_deref(), Some("f4"));
        assert_eq!(shifted(Direction::Down).as_deref(), Some("e3"));
        assert_eq!(shifted(Direction::DownLeft).as_deref(), Some("d3"));
        assert_eq!(shifted(Direction::DownRight).as_deref(), Some("f3"));
    }

    #[test]
    fn shift_off_board() {
        let corner = Square::try_from("a1").unwrap();
        for direction in [
            Direction::Left,
            Direction::UpLeft,
            Direction::Down,
            Direction::DownLeft,
            Direction::DownRight,
        ] {
            assert_eq!(corner.shift(direction), None);
        }
        let corner = Square::try_from("h8").unwrap();
        for direction in [Direction::Up, Direction::UpRight, Direction::Right] {
            assert_eq!(corner.shift(direction), None);
        }
    }

    #[test]
    fn player_geometry() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Rank::home(Player::White), Rank::Two);
        assert_eq!(Rank::home(Player::Black), Rank::Seven);
        assert_eq!(Rank::promotion(Player::White), Rank::Eight);
        assert_eq!(Rank::promotion(Player::Black), Rank::One);

        let e2 = Square::try_from("e2").unwrap();
        let e4 = Square::try_from("e4").unwrap();
        assert_eq!(Player::White.forward_distance(e2, e4), 2);
        assert_eq!(Player::Black.forward_distance(e2, e4), -2);
        assert_eq!(Player::White.push_direction(), Direction::Up);
        assert_eq!(Player::Black.push_direction(), Direction::Down);
    }
}
