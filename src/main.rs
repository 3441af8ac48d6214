#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::error::Error;

use checkmate::{
    color::Color, fen::Fen, game::Game, movement::Move, position::Position, repl::repl,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "checkmate")]
#[command(about = "Play chess on the terminal with every move checked for legality")]
struct Cli {
    /// Position to start from, as `placement [side [castling]]`
    #[arg(short, long)]
    position: Option<Fen>,

    /// Moves to replay before the session starts, like `e2e4 e7e5`
    #[arg(short, long, num_args = 1..)]
    moves: Vec<Move>,

    /// Side whose view the board is drawn from
    #[arg(short, long, default_value = "white")]
    view: Color,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let position = cli
        .position
        .map_or_else(Position::starting_position, |fen| fen.position);
    let game = Game::replay(position, cli.moves)?;
    repl(game, cli.view)?;
    Ok(())
}
