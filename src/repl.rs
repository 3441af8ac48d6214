use std::{
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use log::info;
use rand::random_range;
use thiserror::Error;

use crate::{
    color::Color,
    coord::Coord,
    display::BoardDisplay,
    fen::{Fen, ParseFenError},
    game::{Game, GameStatus},
    legality::legal_moves,
    movement::{Move, ParseMoveError},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInputError {
    #[error(transparent)]
    Fen(#[from] ParseFenError),
    #[error(transparent)]
    Move(#[from] ParseMoveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    Random,
    Resign,
    Coord(Coord),
    Move(Move),
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            "random" => Ok(Input::Random),
            "resign" => Ok(Input::Resign),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Ok(square) = s.parse() {
                    Ok(Input::Coord(square))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|rest| rest.chars().next().is_none_or(char::is_whitespace))
        .map(str::trim_start)
}

fn status_info(game: &Game) -> String {
    match game.status() {
        GameStatus::Active if game.is_in_check() => {
            format!("{} plays\n{} is in check\n", game.side_to_move(), game.side_to_move())
        }
        GameStatus::Active => format!("{} plays\n", game.side_to_move()),
        GameStatus::Finished(end_state) => format!("{end_state}\n"),
    }
}

/// Runs the interactive loop on the terminal.
pub fn repl(game: Game, view: Color) -> io::Result<()> {
    run(game, view, stdin().lock(), stdout().lock(), stderr().lock())
}

#[allow(
    clippy::too_many_lines,
    reason = "each command is a few lines; splitting them apart scatters the loop state"
)]
pub fn run(
    mut game: Game,
    mut view: Color,
    input: impl BufRead,
    mut output: impl Write,
    mut error: impl Write,
) -> io::Result<()> {
    let mut lines = input.lines();

    let mut info = String::new();
    let mut highlighted = Vec::new();
    let mut update = true;
    let mut first_time = true;
    loop {
        if update {
            info = status_info(&game);
        }
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        update = false;
        writeln!(
            output,
            "{}",
            BoardDisplay {
                position: game.position(),
                view,
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available commands, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "flip         - flip the board")?;
                    writeln!(output, "restart      - reset to starting position")?;
                    writeln!(output, "quit         - quit the game")?;
                    writeln!(output, "import <fen> - import a position")?;
                    writeln!(output, "fen          - export the position")?;
                    writeln!(output, "random       - play a random legal move")?;
                    writeln!(output, "resign       - resign for the side to move")?;
                    writeln!(output, "e2           - view legal moves")?;
                    writeln!(output, "e2e4         - play the move")?;
                    writeln!(output, "e1g1         - perform castling")?;
                }
                Input::Flip => {
                    view = !view;
                }
                Input::Restart => {
                    game = Game::new();
                    update = true;
                    highlighted.clear();
                }
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    info!("importing {fen}");
                    game = Game::from_position(fen.position);
                    update = true;
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{}", Fen::from(*game.position()))?;
                }
                Input::Resign => {
                    if let Err(err) = game.resign(game.side_to_move()) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    update = true;
                    highlighted.clear();
                }
                Input::Coord(square) => {
                    let Some(piece) = game.position()[square] else {
                        writeln!(error, "Error: No piece found on {square}")?;
                        continue;
                    };
                    if piece.color() != game.side_to_move() {
                        writeln!(error, "Error: It is {}'s turn", game.side_to_move())?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.extend(game.legal_destinations(square));
                }
                Input::Move(movement) => {
                    if let Err(err) = game.make_move(movement) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.extend([movement.from, movement.to]);
                    update = true;
                }
                Input::Random => {
                    let moves: Vec<_> = legal_moves(game.position(), game.side_to_move()).collect();
                    if moves.is_empty() || game.status() != GameStatus::Active {
                        writeln!(error, "Error: There is no move to play")?;
                        continue;
                    }
                    let movement = moves[random_range(0..moves.len())];
                    if let Err(err) = game.make_move(movement) {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                    writeln!(output, "played {movement}")?;
                    highlighted.clear();
                    highlighted.extend([movement.from, movement.to]);
                    update = true;
                }
            }
            break;
        }
    }
}
