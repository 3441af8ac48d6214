use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        self.lowercase().to_ascii_uppercase()
    }
    pub fn lowercase(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let piece = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        Ok(piece)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error(
    "found `{0}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters"
)]
pub struct InvalidFenPiece(pub char);

/// A piece on the board. Its kind and color are fixed at construction; only
/// the moved flag ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    moved: bool,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece {
            kind,
            color,
            moved: false,
        }
    }
    pub(crate) fn with_moved(self, moved: bool) -> Self {
        Piece { moved, ..self }
    }
    pub fn kind(self) -> PieceKind {
        self.kind
    }
    pub fn color(self) -> Color {
        self.color
    }
    pub fn has_moved(self) -> bool {
        self.moved
    }
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let kind = PieceKind::from_fen(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece::new(color, kind))
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{InvalidFenPiece, Piece, PieceKind},
    };

    #[test]
    fn mark_moved_is_idempotent() {
        let mut piece = Piece::new(Color::White, PieceKind::Rook);
        assert!(!piece.has_moved());
        piece.mark_moved();
        piece.mark_moved();
        assert!(piece.has_moved());
        assert_eq!(piece.kind(), PieceKind::Rook);
        assert_eq!(piece.color(), Color::White);
    }
    #[test]
    fn fen_letter_case_carries_color() {
        assert_eq!(
            Piece::from_fen('Q'),
            Ok(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(
            Piece::from_fen('n'),
            Ok(Piece::new(Color::Black, PieceKind::Knight))
        );
        assert_eq!(Piece::from_fen('x'), Err(InvalidFenPiece('x')));
        assert_eq!(Piece::new(Color::Black, PieceKind::King).fen(), 'k');
    }
}
