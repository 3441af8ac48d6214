use std::{
    array,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, coord::Coord, piece::Piece, position::Position};

const LIGHT_SQUARE: &str = "\x1b[30;107m";
const DARK_SQUARE: &str = "\x1b[30;47m";
const MARKED_SQUARE: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Draws a position with figurines on ANSI colored squares, seen from the
/// side of `view`. Lines of `info` run down the right of the board and
/// continue below it.
pub struct BoardDisplay<'a, 'b> {
    pub position: &'a Position,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub info: &'b str,
}
impl BoardDisplay<'_, '_> {
    /// Rows of squares from the top of the screen, each from left to right.
    fn screen_rows(&self) -> impl Iterator<Item = [Coord; 8]> {
        let view = self.view;
        let flip = move |index: i8| match view {
            Color::White => index,
            Color::Black => 7 - index,
        };
        (0..8).map(move |row| array::from_fn(|col| Coord::new(flip(row), flip(col as i8))))
    }
    fn background(&self, square: Coord) -> &'static str {
        if self.highlighted.contains(&square) {
            MARKED_SQUARE
        } else {
            match square.color() {
                Color::White => LIGHT_SQUARE,
                Color::Black => DARK_SQUARE,
            }
        }
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut info = self.info.lines();
        let mut bottom = None;
        for squares in self.screen_rows() {
            write!(f, "{} ", squares[0].rank())?;
            for square in squares {
                let figurine = self.position[square].map_or(' ', Piece::figurine);
                write!(f, "{}{figurine} {RESET}", self.background(square))?;
            }
            if let Some(line) = info.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
            bottom = Some(squares);
        }
        write!(f, " ")?;
        for square in bottom.into_iter().flatten() {
            write!(f, " {}", square.file())?;
        }
        writeln!(f)?;
        for line in info {
            writeln!(f, "{:19}{line}", "")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{color::Color, display::BoardDisplay, position::Position};

    fn strip_ansi(text: &str) -> String {
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                chars.by_ref().find(|c| *c == 'm');
            } else {
                plain.push(c);
            }
        }
        plain
    }

    #[test]
    fn white_view() {
        let position = Position::starting_position();
        let text = BoardDisplay {
            position: &position,
            view: Color::White,
            highlighted: &[],
            info: "white plays",
        }
        .to_string();
        let plain = strip_ansi(&text);
        let lines: Vec<_> = plain.lines().map(str::trim_end).collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜  white plays");
        assert_eq!(lines[7], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖");
        assert_eq!(lines[8], "  a b c d e f g h");
    }
    #[test]
    fn black_view_and_highlights() {
        let position = Position::starting_position();
        let highlighted = [coord!("e2")];
        let text = BoardDisplay {
            position: &position,
            view: Color::Black,
            highlighted: &highlighted,
            info: "",
        }
        .to_string();
        let plain = strip_ansi(&text);
        let lines: Vec<_> = plain.lines().map(str::trim_end).collect();
        assert_eq!(lines[0], "1 ♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖");
        assert_eq!(lines[6], "7 ♟ ♟ ♟ ♟ ♟ ♟ ♟ ♟");
        assert_eq!(lines[8], "  h g f e d c b a");
        assert_eq!(text.matches("\x1b[30;103m").count(), 1);
    }
    #[test]
    fn info_overflows_below_the_board() {
        let position = Position::empty(Color::White);
        let info = (1..=10).map(|line| format!("line {line}\n")).collect::<String>();
        let text = BoardDisplay {
            position: &position,
            view: Color::White,
            highlighted: &[],
            info: &info,
        }
        .to_string();
        let plain = strip_ansi(&text);
        let lines: Vec<_> = plain.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[7].ends_with(" line 8"));
        assert_eq!(lines[9].trim_start(), "line 9");
        assert_eq!(lines[10].trim_start(), "line 10");
    }
}
