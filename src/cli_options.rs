//! Process command-line options.
//!
//! # Examples
//!
//! Print a reproducible 4x4 scramble and exit:
//!
//! ```text
//! $ photo-finish --size medium --seed 7 --print
//! ```

use clap::Parser;
use env_logger::Env;

use photo_finish::GridSize;

/// Slide the tiles back into place.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Number of tiles along each side of the board
    #[arg(value_enum, short, long, default_value_t = GridSize::Small)]
    pub size: GridSize,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the shuffled board and exit
    #[arg(short, long, default_value_t = false)]
    pub print: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

/// Parse the command line and set up logging.
pub fn parse() -> Args {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    args
}
