use std::io;

use clap::Parser;
use minesweep_core::{GameConfig, GameState, MinefieldGenerator, RandomMinefieldGenerator};

use session::{Ending, Session};

mod input;
mod session;

/// Console Minesweeper on a 10×10 board with 10 mines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let layout = RandomMinefieldGenerator::new(seed).generate(GameConfig::CLASSIC);
    let game = GameState::new(layout);

    let ending = Session::new(game, io::stdin().lock(), io::stdout().lock()).run()?;
    match ending {
        Ending::Won | Ending::Lost => log::info!("Game finished: {:?}", ending),
        Ending::Abandoned => log::info!("Game abandoned"),
    }
    Ok(())
}
