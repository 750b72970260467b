//! At-bat simulation runner
//!
//! Loads a batter card, a pitcher card and card preferences, runs the
//! configured number of trials and prints the batting lines.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use at_bat_engine::core::{CardSide, Handedness, SimulationConfig};
use at_bat_engine::data::{load_card_preferences, PlayerCard};
use at_bat_engine::simulation::{SimulationInput, SimulationRunner, SimulationTables};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CountSource {
    Batter,
    Pitcher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Simulate at-bats between a batter card and a pitcher card
#[derive(Parser, Debug)]
#[command(name = "at_bat_sim")]
#[command(about = "Resolve simulated at-bats over range tables and report AVG/OBP/SLG/OPS")]
struct Args {
    /// Batter card JSON (count_frequencies + event_ranges)
    #[arg(long)]
    batter: PathBuf,

    /// Pitcher card JSON (count_frequencies + event_ranges)
    #[arg(long)]
    pitcher: PathBuf,

    /// Card preference JSON keyed by count label
    #[arg(long)]
    preferences: PathBuf,

    /// TOML configuration; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trials per handedness bucket
    #[arg(long)]
    trials: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trial chunks in parallel
    #[arg(long)]
    parallel: bool,

    /// Card whose count frequencies drive the pitch-count draw
    #[arg(long, value_enum, default_value = "batter")]
    count_source: CountSource,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.parallel |= args.parallel;

    let batter = PlayerCard::load(&args.batter)?;
    let pitcher = PlayerCard::load(&args.pitcher)?;
    let preferences = load_card_preferences(&args.preferences)?;
    let count_source = match args.count_source {
        CountSource::Batter => CardSide::Batter,
        CountSource::Pitcher => CardSide::Pitcher,
    };

    let input = SimulationInput::from_cards(&batter, &pitcher, preferences, count_source);
    let tables = SimulationTables::build(&input, &config)?;

    let start = Instant::now();
    let report = SimulationRunner::new(&tables, &config).run_configured();
    tracing::info!(
        "Finished in {:.2}ms (seed {})",
        start.elapsed().as_secs_f64() * 1000.0,
        report.seed.unwrap_or_default()
    );

    match args.format {
        Format::Json => println!("{}", report.to_json()),
        Format::Text => {
            print!("{}", report.summary());
            for handedness in Handedness::ALL {
                if config.handedness.contains(&handedness) {
                    println!();
                    println!("--- {} ---", handedness);
                    print!("{}", report.result_table(handedness));
                }
            }
        }
    }

    Ok(())
}
