//! Headless battle runner.
//!
//! Loads an encounter from a content directory, plays it out tick by tick
//! and prints how it ended.
//!
//! Run with: `cargo run -p skirmish -- --data-dir data ambush`

mod report;
mod squad;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use combat_content::ContentFactory;
use combat_core::Timestamp;

use squad::SquadOrders;

/// Plays out one encounter without a frontend
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Run a squad encounter to completion", long_about = None)]
#[command(version)]
struct Cli {
    /// Encounter name (file stem under `<DATA_DIR>/encounters/`)
    #[arg(value_name = "ENCOUNTER")]
    encounter: String,

    /// Content directory holding config.toml, effects.ron and encounters/
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Override the RNG seed from config.toml
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Give up after this many simulated milliseconds
    #[arg(long, default_value_t = 600_000)]
    max_duration_ms: u64,

    /// When the squad throws its first grenade
    #[arg(long, default_value_t = 3_000)]
    throw_at_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.tick_ms == 0 {
        bail!("--tick-ms must be greater than zero");
    }

    let factory = ContentFactory::new(cli.data_dir.clone());
    let mut config = factory.load_config()?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let encounter = factory.load_encounter(&cli.encounter)?;
    let mut session = factory.build_session(&encounter, config, Timestamp::ZERO)?;
    let mut orders = SquadOrders::from_encounter(&encounter);

    let mut now = Timestamp::ZERO;
    let outcome = loop {
        if now.as_millis() >= cli.throw_at_ms {
            orders.throw_grenades(&mut session, now);
        }
        orders.patch_up(&mut session);

        let report = session.tick(now);
        if let Some(outcome) = report.outcome {
            break Some(outcome);
        }
        if now.as_millis() >= cli.max_duration_ms {
            tracing::warn!(%now, "battle hit the duration limit");
            break None;
        }
        now = now + cli.tick_ms;
    };

    report::print_summary(&encounter.name, seed, now, outcome, session.roster());
    Ok(())
}
