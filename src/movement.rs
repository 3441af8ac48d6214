use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    coord::{Coord, ParseCoordError},
    piece::{Piece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseMoveError {
    #[error("expected 4 characters like `e2e4`")]
    InvalidLength,
    #[error(transparent)]
    Coord(#[from] ParseCoordError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}
impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }
    /// Whether `piece` making this move is castling: a king sliding two
    /// columns along its row.
    pub fn is_castling(self, piece: Piece) -> bool {
        let (row, col) = self.from.offset(self.to);
        piece.kind() == PieceKind::King && row == 0 && col.abs() == 2
    }
    /// Origin and destination of the rook paired with a castling king move:
    /// the corner on the side the king moves toward, and the square the king
    /// passes over.
    pub fn castling_rook(self) -> (Coord, Coord) {
        let direction = self.from.offset(self.to).1.signum();
        let corner = if direction > 0 { 7 } else { 0 };
        (
            Coord::new(self.from.row, corner),
            Coord::new(self.from.row, self.to.col - direction),
        )
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        Ok(())
    }
}
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let from = s.get(0..2).ok_or(ParseMoveError::InvalidLength)?.parse()?;
        let to = s.get(2..).ok_or(ParseMoveError::InvalidLength)?;
        if to.chars().count() != 2 {
            return Err(ParseMoveError::InvalidLength);
        }
        Ok(Move {
            from,
            to: to.parse()?,
        })
    }
}
