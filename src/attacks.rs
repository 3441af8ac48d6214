//! Line-of-sight and attack questions about a [`Position`].
//!
//! [`is_square_attacked`] is the one predicate behind every "is this square
//! safe" question: check detection, the self-check gate of move legality, and
//! the squares a castling king stands on or crosses.

use crate::{
    color::Color,
    coord::Coord,
    piece::{Piece, PieceKind},
    position::Position,
};

/// Whether every square strictly between `from` and `to` is empty.
///
/// The squares are walked one step at a time in the direction of `to`, so the
/// result only means something when the two squares share a row, a column, or
/// a diagonal; callers establish that first. Adjacent squares and `from == to`
/// are trivially clear. A path with an end off the board is never clear.
pub fn is_path_clear(position: &Position, from: Coord, to: Coord) -> bool {
    if !from.is_valid() || !to.is_valid() {
        return false;
    }
    if from == to {
        return true;
    }
    let (row, col) = from.offset(to);
    from.line(row.signum(), col.signum())
        .take_while(|square| *square != to)
        .all(|square| position[square].is_none())
}

pub(crate) fn is_diagonal(row: i8, col: i8) -> bool {
    row != 0 && row.abs() == col.abs()
}
pub(crate) fn is_straight(row: i8, col: i8) -> bool {
    (row == 0) != (col == 0)
}
pub(crate) fn is_knight_jump(row: i8, col: i8) -> bool {
    matches!((row.abs(), col.abs()), (1, 2) | (2, 1))
}
pub(crate) fn is_king_step(row: i8, col: i8) -> bool {
    row.abs() <= 1 && col.abs() <= 1 && (row, col) != (0, 0)
}

/// Whether `piece` standing on `from` attacks `target`. Pawns attack the two
/// forward diagonals only; sliding pieces need a clear line.
pub fn attacks(position: &Position, from: Coord, piece: Piece, target: Coord) -> bool {
    if !from.is_valid() || !target.is_valid() {
        return false;
    }
    let (row, col) = from.offset(target);
    match piece.kind() {
        PieceKind::Pawn => row == piece.color().pawn_direction() && col.abs() == 1,
        PieceKind::Knight => is_knight_jump(row, col),
        PieceKind::Bishop => is_diagonal(row, col) && is_path_clear(position, from, target),
        PieceKind::Rook => is_straight(row, col) && is_path_clear(position, from, target),
        PieceKind::Queen => {
            (is_diagonal(row, col) || is_straight(row, col))
                && is_path_clear(position, from, target)
        }
        PieceKind::King => is_king_step(row, col),
    }
}

/// Whether any piece of `attacker` attacks `square`. Squares off the board
/// are never attacked.
pub fn is_square_attacked(position: &Position, square: Coord, attacker: Color) -> bool {
    square.is_valid()
        && position
            .pieces_of(attacker)
            .any(|(from, piece)| attacks(position, from, piece, square))
}

/// Whether the king of `color` is attacked. A side without a king is never in
/// check.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    position
        .king_of(color)
        .is_some_and(|king| is_square_attacked(position, king, !color))
}
