//! Whether a move is legal, decided as an ordered chain of gates that each
//! fail closed.
//!
//! Nothing here mutates the position it is handed. Every "what if" question
//! is answered on a copy.

use log::trace;

use crate::{
    attacks::{
        is_diagonal, is_king_step, is_knight_jump, is_path_clear, is_square_attacked, is_straight,
    },
    color::Color,
    coord::Coord,
    movement::Move,
    piece::{Piece, PieceKind},
    position::Position,
};

/// Whether `color` may move the piece on `from` to `to`.
///
/// Rejections are ordinary answers, never errors: out-of-range squares, an
/// origin without a piece of `color`, a destination holding a friendly piece,
/// a move the piece cannot make, and any move that leaves the mover's king
/// attacked (or a position where the mover has no king to protect) all yield
/// `false`.
pub fn is_legal_move(position: &Position, from: Coord, to: Coord, color: Color) -> bool {
    if !from.is_valid() || !to.is_valid() {
        trace!("{from} -> {to}: outside of the board");
        return false;
    }
    let Some(piece) = position[from].filter(|piece| piece.color() == color) else {
        trace!("{from} -> {to}: no {color} piece on {from}");
        return false;
    };
    if position[to].is_some_and(|target| target.color() == color) {
        trace!("{from} -> {to}: destination holds a {color} piece");
        return false;
    }
    if !matches_shape(position, from, to, piece) {
        trace!("{from} -> {to}: not a {} move", piece.kind());
        return false;
    }
    if leaves_king_attacked(position, Move::new(from, to), color) {
        trace!("{from} -> {to}: leaves the {color} king attacked");
        return false;
    }
    true
}

fn matches_shape(position: &Position, from: Coord, to: Coord, piece: Piece) -> bool {
    let (row, col) = from.offset(to);
    match piece.kind() {
        PieceKind::Pawn => is_pawn_move(position, from, to, piece.color()),
        PieceKind::Knight => is_knight_jump(row, col),
        PieceKind::Bishop => is_diagonal(row, col) && is_path_clear(position, from, to),
        PieceKind::Rook => is_straight(row, col) && is_path_clear(position, from, to),
        PieceKind::Queen => {
            (is_diagonal(row, col) || is_straight(row, col)) && is_path_clear(position, from, to)
        }
        PieceKind::King => {
            is_king_step(row, col)
                || (row == 0 && col.abs() == 2 && can_castle(position, from, to, piece))
        }
    }
}

fn is_pawn_move(position: &Position, from: Coord, to: Coord, color: Color) -> bool {
    let direction = color.pawn_direction();
    let (row, col) = from.offset(to);
    match (row, col.abs()) {
        (row, 0) if row == direction => position[to].is_none(),
        (row, 0) if row == 2 * direction => {
            from.row == color.pawn_home_row()
                && position[to].is_none()
                && is_path_clear(position, from, to)
        }
        // diagonal steps are captures only
        (row, 1) if row == direction => position[to].is_some_and(|piece| piece.color() != color),
        _ => false,
    }
}

/// Castling eligibility for a king on `from` sliding two columns to `to`.
fn can_castle(position: &Position, from: Coord, to: Coord, king: Piece) -> bool {
    let color = king.color();
    if king.has_moved() || from != Coord::new(color.home_row(), 4) {
        trace!("{from} -> {to}: the {color} king has left its starting square");
        return false;
    }
    let (rook, _) = Move::new(from, to).castling_rook();
    if !position[rook].is_some_and(|piece| piece.is(color, PieceKind::Rook) && !piece.has_moved())
    {
        trace!("{from} -> {to}: no unmoved {color} rook on {rook}");
        return false;
    }
    if !is_path_clear(position, from, rook) {
        trace!("{from} -> {to}: pieces between king and rook");
        return false;
    }
    if is_square_attacked(position, from, !color) {
        trace!("{from} -> {to}: cannot castle out of check");
        return false;
    }
    let direction = (to.col - from.col).signum();
    let transit = Coord::new(from.row, from.col + direction);
    [transit, to].into_iter().all(|square| {
        let mut simulated = *position;
        simulated.relocate(from, square);
        let safe = !is_square_attacked(&simulated, square, !color);
        if !safe {
            trace!("{from} -> {to}: {square} is attacked");
        }
        safe
    })
}

/// Plays `movement` on a copy and reports whether the mover's king ends up
/// attacked. No king on the copy counts as attacked.
fn leaves_king_attacked(position: &Position, movement: Move, color: Color) -> bool {
    let mut simulated = *position;
    let is_castling = simulated[movement.from].is_some_and(|piece| movement.is_castling(piece));
    if is_castling {
        let (rook, rook_destination) = movement.castling_rook();
        simulated.relocate(rook, rook_destination);
    }
    simulated.relocate(movement.from, movement.to);
    simulated
        .king_of(color)
        .is_none_or(|king| is_square_attacked(&simulated, king, !color))
}

/// Every square the piece on `from` may legally move to, for the color of
/// that piece.
pub fn legal_destinations(position: &Position, from: Coord) -> impl Iterator<Item = Coord> + '_ {
    let color = position.piece_at(from).ok().flatten().map(Piece::color);
    Coord::all().filter(move |to| color.is_some_and(|color| is_legal_move(position, from, *to, color)))
}

pub fn legal_moves(position: &Position, color: Color) -> impl Iterator<Item = Move> + '_ {
    position.pieces_of(color).flat_map(move |(from, _)| {
        legal_destinations(position, from).map(move |to| Move::new(from, to))
    })
}

pub fn has_legal_move(position: &Position, color: Color) -> bool {
    legal_moves(position, color).next().is_some()
}

impl Position {
    /// [`is_legal_move`] for the side to move.
    pub fn is_legal(&self, movement: Move) -> bool {
        is_legal_move(self, movement.from, movement.to, self.side_to_move())
    }
}
