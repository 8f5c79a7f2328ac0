use std::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Serialize, Serializer, Deserialize, Deserializer};

use crate::board::BOARD_SIZE;
use crate::RenjuError;

/// A single placement on the board. `row` and `col` are both in `0..15`,
/// row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The conventional opening move on an empty board.
    pub const fn center() -> Self {
        Self::new(7, 7)
    }

    /// Chebyshev distance to another move, used by the move generator's
    /// adjacency filter and the pre-condition on legal placements.
    pub fn chebyshev_distance(&self, other: Move) -> i32 {
        let dr = (self.row as i32 - other.row as i32).abs();
        let dc = (self.col as i32 - other.col as i32).abs();
        dr.max(dc)
    }

    /// Parses the review worker's letter-number notation (e.g. "H8"):
    /// the letter encodes the column (A -> 0), the number encodes the
    /// *display* row (1 -> row 14, 15 -> row 0) per spec.md §6.
    pub fn from_notation(s: &str) -> Result<Self, RenjuError> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(|| RenjuError::BadNotation(s.to_owned()))?;

        if !letter.is_ascii_alphabetic() {
            return Err(RenjuError::BadNotation(s.to_owned()));
        }

        let col = (letter.to_ascii_uppercase() as u8).wrapping_sub(b'A');
        let digits: String = chars.collect();
        let display_row: i32 = digits.parse().map_err(|_| RenjuError::BadNotation(s.to_owned()))?;

        if !(1..=BOARD_SIZE as i32).contains(&display_row) || col as usize >= BOARD_SIZE {
            return Err(RenjuError::BadNotation(s.to_owned()));
        }

        let row = BOARD_SIZE as i32 - display_row;
        Ok(Move::new(row as u8, col))
    }

    /// Inverse of `from_notation`.
    pub fn to_notation(&self) -> String {
        let letter = (b'A' + self.col) as char;
        let display_row = BOARD_SIZE - self.row as usize;
        format!("{letter}{display_row}")
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_notation())
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_notation())
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Move::from_notation(&s).map_err(serde::de::Error::custom)
    }
}
