use std::fmt::{self, Display, Formatter};

use log::info;
use thiserror::Error;

use crate::{
    attacks::is_in_check,
    color::Color,
    coord::Coord,
    legality::{has_legal_move, legal_destinations},
    movement::Move,
    piece::{Piece, PieceKind},
    position::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Win(Color),
    Draw,
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Win(color) => write!(f, "{color} wins")?,
            EndState::Draw => write!(f, "draw")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Active,
    Finished(EndState),
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("the game is over, {0}")]
    GameOver(EndState),
    #[error("{movement} is not a legal move for {color}")]
    IllegalMove { movement: Move, color: Color },
}
/// One applied move: what moved and what, if anything, it captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub movement: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}
impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.piece, self.movement)?;
        if let Some(captured) = self.captured {
            write!(f, " takes {captured}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Material {
    LoneKing,
    MinorPiece,
    Sufficient,
}
/// What `color` has besides its king. A knight alone, or bishops that all
/// stand on squares of one shade, cannot deliver mate.
fn material(position: &Position, color: Color) -> Material {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Minor {
        Knight,
        Bishops(Color),
    }
    position
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind() != PieceKind::King)
        .try_fold(None, |minor, (square, piece)| match (piece.kind(), minor) {
            (PieceKind::Knight, None) => Some(Some(Minor::Knight)),
            (PieceKind::Bishop, None) => Some(Some(Minor::Bishops(square.color()))),
            (PieceKind::Bishop, Some(Minor::Bishops(shade))) if shade == square.color() => {
                Some(minor)
            }
            _ => None,
        })
        .map_or(Material::Sufficient, |minor| match minor {
            Some(_) => Material::MinorPiece,
            None => Material::LoneKing,
        })
}
pub fn is_insufficient_material(position: &Position) -> bool {
    matches!(
        (
            material(position, Color::White),
            material(position, Color::Black)
        ),
        (Material::LoneKing, Material::LoneKing | Material::MinorPiece)
            | (Material::MinorPiece, Material::LoneKing)
    )
}

/// A position together with how it was reached and whether play may go on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    position: Position,
    history: Vec<MoveRecord>,
    status: GameStatus,
}
impl Game {
    pub fn new() -> Self {
        Game::from_position(Position::starting_position())
    }
    pub fn from_position(position: Position) -> Self {
        let mut game = Game {
            position,
            history: Vec::new(),
            status: GameStatus::Active,
        };
        game.update_status();
        game
    }
    /// Plays `moves` in order from `position`, stopping at the first one that
    /// is rejected.
    pub fn replay(
        position: Position,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<Self, Rejection> {
        let mut game = Game::from_position(position);
        for movement in moves {
            game.make_move(movement)?;
        }
        Ok(game)
    }
    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }
    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.position, self.side_to_move())
    }
    /// Squares the piece on `from` may move to. Empty unless the game is
    /// active and the piece belongs to the side to move.
    pub fn legal_destinations(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        let movable = self.status == GameStatus::Active
            && self
                .position
                .piece_at(from)
                .is_ok_and(|piece| piece.is_some_and(|piece| piece.color() == self.side_to_move()));
        legal_destinations(&self.position, from).filter(move |_| movable)
    }
    pub fn make_move(&mut self, movement: Move) -> Result<MoveRecord, Rejection> {
        if let GameStatus::Finished(end_state) = self.status {
            return Err(Rejection::GameOver(end_state));
        }
        let color = self.side_to_move();
        let illegal = Rejection::IllegalMove { movement, color };
        if !self.position.is_legal(movement) {
            return Err(illegal);
        }
        let piece = self.position[movement.from].ok_or(illegal)?;
        let captured = self.position.apply_move(movement).map_err(|_| illegal)?;
        let record = MoveRecord {
            movement,
            piece,
            captured,
        };
        self.history.push(record);
        self.update_status();
        Ok(record)
    }
    pub fn resign(&mut self, color: Color) -> Result<EndState, Rejection> {
        if let GameStatus::Finished(end_state) = self.status {
            return Err(Rejection::GameOver(end_state));
        }
        let end_state = EndState::Win(!color);
        info!("{color} resigns, {end_state}");
        self.status = GameStatus::Finished(end_state);
        Ok(end_state)
    }
    fn update_status(&mut self) {
        let color = self.side_to_move();
        self.status = if is_insufficient_material(&self.position) {
            info!("insufficient material, draw");
            GameStatus::Finished(EndState::Draw)
        } else if has_legal_move(&self.position, color) {
            GameStatus::Active
        } else if self.is_in_check() {
            let end_state = EndState::Win(!color);
            info!("checkmate, {end_state}");
            GameStatus::Finished(end_state)
        } else {
            info!("stalemate, {color} has no legal move");
            GameStatus::Finished(EndState::Draw)
        };
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
