#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

#[cfg(test)]
macro_rules! coord {
    ($square:literal) => {
        $square.parse::<$crate::coord::Coord>().unwrap()
    };
}

pub mod attacks;
pub mod color;
pub mod coord;
pub mod display;
pub mod error;
pub mod fen;
pub mod game;
pub mod legality;
pub mod movement;
pub mod piece;
pub mod position;
pub mod repl;
