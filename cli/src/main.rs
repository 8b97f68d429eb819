use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use demina_core::{
    BoardGenerator, Command, Game, GameConfig, GameState, RandomBoardGenerator, dispatch,
};

mod render;

#[derive(Parser, Debug)]
#[command(name = "demina", about = "Turn-based terminal minesweeper", version)]
struct Args {
    /// Board rows
    #[arg(long, default_value_t = 8)]
    rows: u8,
    /// Board columns
    #[arg(long, default_value_t = 8)]
    cols: u8,
    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: u16,
    /// Fixed seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,
    #[command(flatten)]
    verbosity: Verbosity,
}

fn new_game(config: GameConfig, seed: Option<u64>) -> Game {
    let seed = seed.unwrap_or_else(rand::random);
    Game::new(RandomBoardGenerator::new(seed).generate(config))
}

fn print_help() {
    println!("Commands:");
    println!("  open ROW COL (o) - open a cell");
    println!("  flag ROW COL (f) - flag or unflag a cell");
    println!("  new (n)          - start a fresh board");
    println!("  help (h)         - show this help");
    println!("  quit (q)         - leave the game");
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = GameConfig::new(args.rows, args.cols, args.mines)?;
    let mut game = new_game(config, args.seed);

    println!(
        "demina: {}x{} board with {} mines",
        config.rows, config.cols, config.mines
    );
    print_help();

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        println!("\n{}", render::draw(&game));

        if game.is_finished() {
            match game.state() {
                GameState::Won => println!("You cleared the board!"),
                GameState::Lost => println!("Boom! You opened a mine."),
                GameState::Playing => unreachable!(),
            }

            print!("Play again? [y/N] ");
            io::stdout().flush()?;
            input.clear();
            if stdin.lock().read_line(&mut input)? == 0 {
                break;
            }
            if input.trim().eq_ignore_ascii_case("y") {
                game = new_game(config, None);
                continue;
            }
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "q" | "quit" => break,
            "h" | "help" => print_help(),
            "n" | "new" => game = new_game(config, None),
            _ => match Command::parse(line) {
                Some(command) => {
                    if !dispatch(&mut game, command) {
                        log::info!("command left the game unchanged: {command:?}");
                    }
                }
                None => println!("Unrecognized command, type 'help'"),
            },
        }
    }

    Ok(())
}
