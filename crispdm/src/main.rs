mod config;
mod report;

use std::{env, io};

use anyhow::{Context, Result};
use log::{error, info};
use regression::{DataGenerator, DatasetCache, Session};

use config::DemoConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = DemoConfig::load(env::args().nth(1))?;
    info!("using {:?}", config.params);

    let generator = match config.seed {
        Some(seed) => DataGenerator::seeded(seed),
        None => DataGenerator::from_os_rng(),
    };
    let mut session = Session::new(generator, DatasetCache::unbounded());

    let outcome = match session.update(config.params) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("cannot run the walkthrough: {e}");
            eprintln!("Please adjust the parameters: {e}");
            std::process::exit(2);
        }
    };

    let mut stdout = io::stdout().lock();
    report::write_report(&mut stdout, outcome.snapshot(), config.preview_rows)
        .context("failed to write the report")?;

    Ok(())
}
