use thiserror::Error;

use crate::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{0} is outside of the board")]
pub struct OutOfBounds(pub Coord);

/// A caller handed the engine something it promised not to. There is no
/// in-game recovery from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ContractViolation {
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),
    #[error("no piece found on {0}")]
    EmptyOrigin(Coord),
    #[error("castling requires a king on {king} and a rook of the same color on {rook}")]
    NotKingAndRook { king: Coord, rook: Coord },
}
