mod cli_options;
mod terminal;

use rand::{rngs::StdRng, SeedableRng};
use std::error::Error;

use photo_finish::Session;

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli_options::parse();
    let size = args.size.dimension();

    let mut session = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            Session::with_rng(size, terminal::METRICS, &mut rng)?
        }
        None => Session::new(size, terminal::METRICS)?,
    };

    if args.print {
        println!("Shuffled {}:\n{}", args.size, session.puzzle());
        return Ok(());
    }

    terminal::run(&mut session, args.size)?;
    Ok(())
}
