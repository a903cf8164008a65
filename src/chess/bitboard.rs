//! [`Bitboard`] is a set of squares packed into a single 64 bit integer. The
//! board keeps pawns in a square-indexed table, bitboards are derived from it
//! whenever a question is about whole groups of pawns at once: counting the
//! material or scanning all pawns of a player for a possible move.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not, Shl, Shr, Sub};

use itertools::Itertools;

use crate::chess::core::{Direction, Square, BOARD_SIZE, BOARD_WIDTH};

/// Represents a set of squares and provides common operations (e.g. AND, OR,
/// difference) over these sets. Each bit corresponds to one of 64 squares of
/// the board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit - to H8.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: u64,
}

const FILE_A: Bitboard = Bitboard::from_bits(0x0101_0101_0101_0101);
const FILE_H: Bitboard = Bitboard::from_bits(0x8080_8080_8080_8080);

impl Bitboard {
    /// Constructs Bitboard from pre-calculated bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Constructs a bitboard representing empty set of squares.
    #[must_use]
    pub const fn empty() -> Self {
        Self::from_bits(0)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Number of squares in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Moves every square of the set one step in the given direction. Squares
    /// that would leave the board (including wrapping around the A and H files)
    /// are dropped.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Self {
        let width = u32::from(BOARD_WIDTH);
        match direction {
            Direction::Up => self << width,
            Direction::Down => self >> width,
            Direction::Left => (self - FILE_A) >> 1,
            Direction::Right => (self - FILE_H) << 1,
            Direction::UpLeft => (self - FILE_A) << (width - 1),
            Direction::UpRight => (self - FILE_H) << (width + 1),
            Direction::DownLeft => (self - FILE_A) >> (width + 1),
            Direction::DownRight => (self - FILE_H) >> (width - 1),
        }
    }

    /// An efficient way to iterate over the set squares.
    #[must_use]
    pub const fn iter(self) -> BitboardIterator {
        BitboardIterator { bits: self.bits }
    }
}

impl fmt::Debug for Bitboard {
    /// Dumps the set as a grid: top row is the eighth rank, `1` marks a set
    /// square.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = (0..BOARD_SIZE)
            .map(|index| if self.bits >> index & 1 == 1 { '1' } else { '.' })
            .chunks(BOARD_WIDTH as usize)
            .into_iter()
            .map(|mut row| row.join(" "))
            .collect::<Vec<String>>();
        write!(f, "{}", grid.iter().rev().join("\n"))
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitor(rhs.bits))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits.bitor_assign(rhs.bits);
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.bits.bitand(rhs.bits))
    }
}

impl Sub for Bitboard {
    type Output = Self;

    /// [Relative component], i.e. Result = LHS \ RHS.
    ///
    /// [Relative component]: https://en.wikipedia.org/wiki/Complement_%28set_theory%29#Relative_complement
    fn sub(self, rhs: Self) -> Self::Output {
        self & !rhs
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_bits(!self.bits)
    }
}

impl Shl<u32> for Bitboard {
    type Output = Self;

    /// Shifts the bits to the left and ignores overflow.
    fn shl(self, rhs: u32) -> Self::Output {
        let (bits, _) = self.bits.overflowing_shl(rhs);
        Self::from_bits(bits)
    }
}

impl Shr<u32> for Bitboard {
    type Output = Self;

    /// Shifts the bits to the right and ignores overflow.
    fn shr(self, rhs: u32) -> Self::Output {
        let (bits, _) = self.bits.overflowing_shr(rhs);
        Self::from_bits(bits)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        Self::from_bits(1u64 << square.index())
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(squares: T) -> Self {
        let mut result = Self::empty();
        for square in squares {
            result |= Self::from(square);
        }
        result
    }
}

/// Iterates over set squares in a given [Bitboard] from least significant 1
/// bits (LS1B) to most significant 1 bits (MS1B).
pub struct BitboardIterator {
    bits: u64,
}

impl Iterator for BitboardIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        // Get the LS1B and consume it from the iterator.
        let next_index = self.bits.trailing_zeros();
        self.bits ^= 1 << next_index;
        u8::try_from(next_index)
            .ok()
            .and_then(|index| Square::try_from(index).ok())
    }
}
