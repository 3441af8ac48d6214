use std::{
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
};

use log::debug;

use crate::{
    color::Color,
    coord::Coord,
    error::{ContractViolation, OutOfBounds},
    movement::Move,
    piece::{Piece, PieceKind},
};

/// An 8×8 grid of optional pieces and the side to move.
///
/// `Position` is `Copy`; copying it is how legality checking gets a
/// disposable board to simulate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
}
impl Position {
    pub fn empty(side_to_move: Color) -> Self {
        Position {
            squares: [[None; 8]; 8],
            side_to_move,
        }
    }
    pub fn starting_position() -> Self {
        let back_rank =
            |color| PieceKind::STARTING_CONFIGURATION.map(|kind| Some(Piece::new(color, kind)));
        let pawns = |color| [Some(Piece::new(color, PieceKind::Pawn)); 8];
        Position {
            squares: [
                back_rank(Color::Black),
                pawns(Color::Black),
                [None; 8],
                [None; 8],
                [None; 8],
                [None; 8],
                pawns(Color::White),
                back_rank(Color::White),
            ],
            side_to_move: Color::White,
        }
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = !self.side_to_move;
    }
    pub fn piece_at(&self, position: Coord) -> Result<Option<Piece>, OutOfBounds> {
        if position.is_valid() {
            Ok(self[position])
        } else {
            Err(OutOfBounds(position))
        }
    }
    /// Puts `piece` on the square without any legality checking and returns
    /// what was there before.
    pub fn set(
        &mut self,
        position: Coord,
        piece: Option<Piece>,
    ) -> Result<Option<Piece>, OutOfBounds> {
        if position.is_valid() {
            Ok(std::mem::replace(&mut self[position], piece))
        } else {
            Err(OutOfBounds(position))
        }
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; 8]> {
        self.squares.iter()
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|position| Some((position, self[position]?)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }
    pub fn king_of(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(position, _)| position)
    }
    /// Moves whatever stands on `from` to `to`, marking it moved. Both squares
    /// must be on the board.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let mut piece = self[from].take();
        if let Some(piece) = &mut piece {
            piece.mark_moved();
        }
        std::mem::replace(&mut self[to], piece)
    }
    /// Applies a move that the caller already knows to be legal: relocates the
    /// piece, moves the paired rook when a king castles, and passes the turn.
    /// Returns the captured piece, if any.
    pub fn apply_move(&mut self, movement: Move) -> Result<Option<Piece>, ContractViolation> {
        let Move { from, to } = movement;
        for square in [from, to] {
            if !square.is_valid() {
                return Err(OutOfBounds(square).into());
            }
        }
        let piece = self[from].ok_or(ContractViolation::EmptyOrigin(from))?;
        let captured = if movement.is_castling(piece) {
            let (rook, _) = movement.castling_rook();
            self.castle(from, rook)?;
            None
        } else {
            self.relocate(from, to)
        };
        self.toggle_side_to_move();
        debug!("{piece} {movement}, {} to move", self.side_to_move);
        Ok(captured)
    }
    pub fn into_moved(self, movement: Move) -> Result<Self, ContractViolation> {
        let mut moved = self;
        moved.apply_move(movement)?;
        Ok(moved)
    }
    /// Slides the king two columns toward the rook and places the rook on the
    /// square the king crossed. Both pieces are marked moved. Does not pass
    /// the turn.
    pub fn castle(&mut self, king: Coord, rook: Coord) -> Result<(), ContractViolation> {
        let not_king_and_rook = ContractViolation::NotKingAndRook { king, rook };
        if !king.is_valid() || !rook.is_valid() || king.row != rook.row || king == rook {
            return Err(not_king_and_rook);
        }
        match (self[king], self[rook]) {
            (Some(king_piece), Some(rook_piece))
                if king_piece.kind() == PieceKind::King
                    && rook_piece.is(king_piece.color(), PieceKind::Rook) => {}
            _ => return Err(not_king_and_rook),
        }
        let direction = (rook.col - king.col).signum();
        let king_destination = Coord::new(king.row, king.col + 2 * direction);
        let rook_destination = Coord::new(king.row, king.col + direction);
        if !king_destination.is_valid() {
            return Err(not_king_and_rook);
        }
        let rook_piece = self[rook].take();
        self.relocate(king, king_destination);
        self[rook_destination] = rook_piece.map(|piece| piece.with_moved(true));
        Ok(())
    }
}
impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}
impl Index<Coord> for Position {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        let (row, col) = index.indices();
        &self.squares[row][col]
    }
}
impl IndexMut<Coord> for Position {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        let (row, col) = index.indices();
        &mut self.squares[row][col]
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (position, piece) in self.pieces() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{piece} on {position}")?;
        }
        Ok(())
    }
}
