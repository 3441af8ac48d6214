use std::{
    fmt::{self, Display, Formatter},
    ops::Not,
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("provided string was not `w`, `b`, `W`, `B`, `white`, or `black`")]
pub struct ParseColorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}
impl Color {
    pub const ALL: [Self; 2] = [Color::White, Color::Black];

    pub fn lowercase(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
    /// Row delta of a single pawn step.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    /// Row holding the king and rooks in the starting arrangement.
    pub fn home_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
    pub fn pawn_home_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white")?,
            Color::Black => write!(f, "black")?,
        }
        Ok(())
    }
}
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = match s {
            "w" | "W" | "white" => Color::White,
            "b" | "B" | "black" => Color::Black,
            _ => return Err(ParseColorError),
        };
        Ok(color)
    }
}
impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::color::{Color, ParseColorError};

    #[test]
    fn opposite_of_opposite_is_same() {
        for color in Color::ALL {
            assert_eq!(!!color, color);
            assert_ne!(!color, color);
        }
    }
    #[test]
    fn parse_accepts_short_and_long_forms() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("black".parse(), Ok(Color::Black));
        assert_eq!("red".parse::<Color>(), Err(ParseColorError));
    }
    #[test]
    fn pawns_step_away_from_home() {
        for color in Color::ALL {
            assert_eq!(
                color.pawn_home_row() - color.home_row(),
                color.pawn_direction()
            );
        }
    }
}
