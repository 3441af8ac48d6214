use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseCoordError {
    #[error("expected 2 characters, found none instead")]
    Empty,
    #[error("expected 2 characters, found 1 instead")]
    RankNotProvided,
    #[error("`{0}` is not a letter from a to h")]
    InvalidFile(char),
    #[error("`{0}` is not a number from 1 to 8")]
    InvalidRank(char),
    #[error("unexpected `{0}`, only 2 characters are expected")]
    UnexpectedSymbol(char),
}

/// A square as `(row, col)`. Row 0 is rank 8, column 0 is the a-file.
///
/// Values outside `0..8` are representable so callers can ask about them;
/// [`Coord::is_valid`] tells whether the square is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}
impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }
    pub fn is_valid(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }
    pub fn move_by(self, row: i8, col: i8) -> Option<Self> {
        let row = self.row.checked_add(row)?;
        let col = self.col.checked_add(col)?;
        Some(Coord { row, col }).filter(|position| position.is_valid())
    }
    /// `(Δrow, Δcol)` going from `self` to `other`, saturating at the `i8`
    /// range when either square lies far outside of the board.
    pub fn offset(self, other: Self) -> (i8, i8) {
        (
            other.row.saturating_sub(self.row),
            other.col.saturating_sub(self.col),
        )
    }
    /// Squares walked from `self` in the given step, excluding `self`, until
    /// the edge of the board.
    pub fn line(self, row: i8, col: i8) -> impl Iterator<Item = Self> {
        (1..8).map_while(move |distance| {
            self.move_by(row.checked_mul(distance)?, col.checked_mul(distance)?)
        })
    }
    /// File letter of a square on the board.
    pub fn file(self) -> char {
        debug_assert!(self.is_valid(), "{self:?} is outside of the board");
        (b'a' + self.col as u8) as char
    }
    /// Rank number, 1 for White's back rank.
    pub fn rank(self) -> i8 {
        8i8.saturating_sub(self.row)
    }
    pub fn color(self) -> Color {
        if (self.row + self.col) % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Coord { row, col }))
    }
    pub(crate) fn indices(self) -> (usize, usize) {
        debug_assert!(self.is_valid(), "{self:?} is outside of the board");
        (self.row as usize, self.col as usize)
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let col = match file {
            'a'..='h' => (file as u8 - b'a') as i8,
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1') as i8,
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord { row, col })
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", self.file(), self.rank())?;
        } else {
            write!(f, "({}, {})", self.row, self.col)?;
        }
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let file = characters.next().ok_or(ParseCoordError::Empty)?;
        let rank = characters.next().ok_or(ParseCoordError::RankNotProvided)?;
        let coord = Coord::from_chars(file, rank)?;
        if let Some(c) = characters.next() {
            return Err(ParseCoordError::UnexpectedSymbol(c));
        }
        Ok(coord)
    }
}
