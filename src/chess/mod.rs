//! Implementation of Pawns-Only chess, its rules and specifics.

pub mod bitboard;
pub mod board;
pub mod core;
pub mod game;
pub mod moves;
