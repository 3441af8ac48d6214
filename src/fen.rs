//! The compact rank-by-rank encoding of a [`Position`].
//!
//! `placement [side [castling]]`, for example
//! `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq`. The placement lists
//! rows 0 to 7 separated by `/`, a digit standing for that many empty squares.
//! The side defaults to white. Without a castling field the moved flags are
//! inferred: a piece counts as unmoved only on a square it starts the game on.

use std::{
    fmt::{self, Display, Formatter},
    iter::{Peekable, once, repeat},
    str::FromStr,
};

use thiserror::Error;

use crate::{
    attacks::is_in_check,
    color::{Color, ParseColorError},
    coord::Coord,
    piece::{InvalidFenPiece, Piece, PieceKind},
    position::Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("expected a piece placement, found nothing")]
    Empty,
    #[error("expected 8 ranks separated by `/`, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {squares} squares, expected 8")]
    RankWidth { rank: i8, squares: i8 },
    #[error(transparent)]
    Piece(#[from] InvalidFenPiece),
    #[error("invalid side to move: {0}")]
    Side(#[from] ParseColorError),
    #[error("`{0}` is not a castling right, expected `-` or letters from `KQkq`")]
    InvalidCastlingRight(char),
    #[error("castling right `{0}` needs a king on its starting square and a rook in the corner")]
    UnavailableCastlingRight(char),
    #[error("castling right `{0}` is listed more than once")]
    RepeatedCastlingRight(char),
    #[error("{0} is in check but it is not their turn")]
    WaitingSideInCheck(Color),
    #[error("unexpected `{0}` after the castling rights")]
    Unexpected(String),
}

const CASTLING_RIGHTS: [(char, Color, i8); 4] = [
    ('K', Color::White, 7),
    ('Q', Color::White, 0),
    ('k', Color::Black, 7),
    ('q', Color::Black, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub position: Position,
}
impl Fen {
    /// Only the piece placement field.
    pub fn placement(&self) -> Placement<'_> {
        Placement(&self.position)
    }
    pub fn castling_rights(&self) -> impl Iterator<Item = char> + '_ {
        CASTLING_RIGHTS
            .into_iter()
            .filter(|(_, color, corner)| has_castling_right(&self.position, *color, *corner))
            .map(|(flag, _, _)| flag)
    }
}
impl From<Position> for Fen {
    fn from(position: Position) -> Self {
        Fen { position }
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.placement(),
            self.position.side_to_move().lowercase()
        )?;
        let mut rights = self.castling_rights().peekable();
        if rights.peek().is_none() {
            write!(f, " -")?;
        } else {
            write!(f, " ")?;
            for flag in rights {
                write!(f, "{flag}")?;
            }
        }
        Ok(())
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let mut position = parse_placement(fields.next().ok_or(ParseFenError::Empty)?)?;
        if let Some(side) = fields.next() {
            position.set_side_to_move(side.parse()?);
        }
        if let Some(castling) = fields.next() {
            apply_castling_rights(&mut position, castling)?;
        }
        if let Some(extra) = fields.next() {
            return Err(ParseFenError::Unexpected(extra.to_owned()));
        }
        let waiting = !position.side_to_move();
        if is_in_check(&position, waiting) {
            return Err(ParseFenError::WaitingSideInCheck(waiting));
        }
        Ok(Fen { position })
    }
}

pub struct Placement<'a>(pub &'a Position);

impl Display for Placement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (row, first) in self.0.rows().zip(once(true).chain(repeat(false))) {
            if !first {
                write!(f, "/")?;
            }
            for cell in CellIter(row.iter().copied().peekable()) {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(Piece),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.next_if(Option::is_none).is_some() {
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}

fn parse_placement(s: &str) -> Result<Position, ParseFenError> {
    let ranks: Vec<_> = s.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::RankCount(ranks.len()));
    }
    let mut position = Position::empty(Color::White);
    for (row, rank) in (0..).zip(ranks) {
        let width_error = |squares| ParseFenError::RankWidth {
            rank: 8 - row,
            squares,
        };
        let mut col: i8 = 0;
        for c in rank.chars() {
            if let Some(empty) = c.to_digit(10).filter(|empty| (1..=8).contains(empty)) {
                col += empty as i8;
            } else {
                let piece = Piece::from_fen(c)?;
                if col < 8 {
                    let square = Coord::new(row, col);
                    position[square] = Some(piece.with_moved(!starts_on(piece, square)));
                }
                col += 1;
            }
            if col > 8 {
                return Err(width_error(col));
            }
        }
        if col != 8 {
            return Err(width_error(col));
        }
    }
    Ok(position)
}

/// Whether `square` is one `piece` occupies in the starting arrangement.
fn starts_on(piece: Piece, square: Coord) -> bool {
    let color = piece.color();
    match piece.kind() {
        PieceKind::Pawn => square.row == color.pawn_home_row(),
        kind => {
            square.row == color.home_row()
                && PieceKind::STARTING_CONFIGURATION[square.col as usize] == kind
        }
    }
}

/// The king of `color` if it stands on the square it starts the game on.
fn starting_king(position: &Position, color: Color) -> Option<(Coord, Piece)> {
    let square = Coord::new(color.home_row(), 4);
    position[square]
        .filter(|piece| piece.is(color, PieceKind::King))
        .map(|king| (square, king))
}

fn has_castling_right(position: &Position, color: Color, corner: i8) -> bool {
    let king_unmoved = starting_king(position, color).is_some_and(|(_, king)| !king.has_moved());
    let rook = Coord::new(color.home_row(), corner);
    king_unmoved
        && position[rook].is_some_and(|piece| piece.is(color, PieceKind::Rook) && !piece.has_moved())
}

fn apply_castling_rights(position: &mut Position, field: &str) -> Result<(), ParseFenError> {
    let mut listed = Vec::new();
    if field != "-" {
        for flag in field.chars() {
            if !CASTLING_RIGHTS.iter().any(|(right, _, _)| *right == flag) {
                return Err(ParseFenError::InvalidCastlingRight(flag));
            }
            if listed.contains(&flag) {
                return Err(ParseFenError::RepeatedCastlingRight(flag));
            }
            listed.push(flag);
        }
    }
    for color in Color::ALL {
        let rights: Vec<_> = CASTLING_RIGHTS
            .into_iter()
            .filter(|(_, right_color, _)| *right_color == color)
            .collect();
        let any_listed = rights.iter().any(|(flag, _, _)| listed.contains(flag));
        let king = starting_king(position, color);
        if let Some((square, piece)) = king {
            position[square] = Some(piece.with_moved(!any_listed));
        }
        for (flag, _, corner) in rights {
            let rook = Coord::new(color.home_row(), corner);
            let own_rook = position[rook].filter(|piece| piece.is(color, PieceKind::Rook));
            let is_listed = listed.contains(&flag);
            match own_rook {
                Some(piece) if king.is_some() || !is_listed => {
                    position[rook] = Some(piece.with_moved(!is_listed));
                }
                _ if is_listed => return Err(ParseFenError::UnavailableCastlingRight(flag)),
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord::Coord,
        fen::{Fen, ParseFenError},
        piece::{InvalidFenPiece, PieceKind},
        position::Position,
    };

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_position_round_trip() {
        let fen = Fen::from(Position::starting_position());
        assert_eq!(fen.placement().to_string(), START);
        assert_eq!(fen.to_string(), format!("{START} w KQkq"));
        let parsed: Fen = START.parse().unwrap();
        assert_eq!(parsed.position, Position::starting_position());
    }
    #[test]
    fn round_trip_after_legal_play() {
        let mut position = Position::starting_position();
        for movement in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1"] {
            let movement = movement.parse().unwrap();
            assert!(position.is_legal(movement), "{movement}");
            position.apply_move(movement).unwrap();
        }
        let encoded = Fen::from(position).to_string();
        assert_eq!(
            encoded,
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq"
        );
        let decoded: Fen = encoded.parse().unwrap();
        assert_eq!(decoded.to_string(), encoded);
        assert_eq!(decoded.position.side_to_move(), Color::Black);
        assert!(!decoded.position.is_legal("e8g8".parse().unwrap()));
        let placement = Fen::from(position).placement().to_string();
        let placement_only: Fen = placement.parse().unwrap();
        assert_eq!(placement_only.placement().to_string(), placement);
    }
    #[test]
    fn inferred_moved_flags() {
        let fen: Fen = "4k3/8/8/8/8/4P3/P7/R3K1R1".parse().unwrap();
        let position = fen.position;
        assert!(!position[coord!("e1")].unwrap().has_moved());
        assert!(!position[coord!("a1")].unwrap().has_moved());
        assert!(position[coord!("g1")].unwrap().has_moved());
        assert!(!position[coord!("a2")].unwrap().has_moved());
        assert!(position[coord!("e3")].unwrap().has_moved());
        assert_eq!(fen.castling_rights().collect::<String>(), "Q");

        let displaced: Fen = "4k3/8/8/8/8/8/8/R5K1".parse().unwrap();
        assert!(displaced.position[coord!("g1")].unwrap().has_moved());
        assert_eq!(displaced.to_string(), "4k3/8/8/8/8/8/8/R5K1 w -");
    }
    #[test]
    fn castling_field_sets_moved_flags() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq".parse().unwrap();
        let position = fen.position;
        assert!(!position[coord!("h1")].unwrap().has_moved());
        assert!(position[coord!("a1")].unwrap().has_moved());
        assert!(!position[coord!("e1")].unwrap().has_moved());
        assert!(position[coord!("h8")].unwrap().has_moved());
        assert!(!position[coord!("a8")].unwrap().has_moved());
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq");

        let none: Fen = "r3k2r/8/8/8/8/8/8/R3K2R b -".parse().unwrap();
        assert!(none.position[coord!("e8")].unwrap().has_moved());
        assert_eq!(none.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R b -");
    }
    #[test]
    fn malformed_placements() {
        assert_eq!("".parse::<Fen>(), Err(ParseFenError::Empty));
        assert_eq!(
            "8/8/8/8/8/8/8".parse::<Fen>(),
            Err(ParseFenError::RankCount(7))
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8/8".parse::<Fen>(),
            Err(ParseFenError::RankCount(9))
        );
        assert_eq!(
            "rnbqkbn/8/8/8/8/8/8/8".parse::<Fen>(),
            Err(ParseFenError::RankWidth { rank: 8, squares: 7 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/RNBQKBNRR".parse::<Fen>(),
            Err(ParseFenError::RankWidth { rank: 1, squares: 9 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/72".parse::<Fen>(),
            Err(ParseFenError::RankWidth { rank: 1, squares: 9 })
        );
        assert_eq!(
            "8/8/8/8/44/8/8/9".parse::<Fen>(),
            Err(ParseFenError::Piece(InvalidFenPiece('9')))
        );
        assert_eq!(
            "8/8/8/8/8/8/8/8/".parse::<Fen>(),
            Err(ParseFenError::RankCount(9))
        );
        assert_eq!(
            "8/8/8/8//8/8/8".parse::<Fen>(),
            Err(ParseFenError::RankWidth { rank: 4, squares: 0 })
        );
        assert_eq!(
            "8/8/8/8/8/8/8/7x".parse::<Fen>(),
            Err(ParseFenError::Piece(InvalidFenPiece('x')))
        );
    }
    #[test]
    fn malformed_fields() {
        assert!(matches!(
            format!("{START} x").parse::<Fen>(),
            Err(ParseFenError::Side(_))
        ));
        assert_eq!(
            format!("{START} w KX").parse::<Fen>(),
            Err(ParseFenError::InvalidCastlingRight('X'))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w K".parse::<Fen>(),
            Err(ParseFenError::UnavailableCastlingRight('K'))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/R3K3 w K".parse::<Fen>(),
            Err(ParseFenError::UnavailableCastlingRight('K'))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/R5K1 w Q".parse::<Fen>(),
            Err(ParseFenError::UnavailableCastlingRight('Q'))
        );
        assert_eq!(
            "r5k1/8/8/8/8/8/8/4K3 w q".parse::<Fen>(),
            Err(ParseFenError::UnavailableCastlingRight('q'))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4R2K w".parse::<Fen>(),
            Err(ParseFenError::WaitingSideInCheck(Color::Black))
        );
        assert!("4k3/8/8/8/8/8/8/4R2K b".parse::<Fen>().is_ok());
        assert_eq!(
            format!("{START} w KQkK").parse::<Fen>(),
            Err(ParseFenError::RepeatedCastlingRight('K'))
        );
        assert_eq!(
            format!("{START} w qkQK").parse::<Fen>().map(|fen| fen.to_string()),
            Ok(format!("{START} w KQkq"))
        );
        assert_eq!(
            format!("{START} w KQkq - 0 1").parse::<Fen>(),
            Err(ParseFenError::Unexpected("-".to_owned()))
        );
    }
    #[test]
    fn kingless_rook_keeps_right_only_when_unlisted() {
        let fen: Fen = "8/8/8/8/8/8/8/R7 w -".parse().unwrap();
        assert!(fen.position[Coord::new(7, 0)].unwrap().has_moved());
        assert_eq!(
            fen.position[Coord::new(7, 0)].map(|piece| piece.kind()),
            Some(PieceKind::Rook)
        );
    }
}
