//! Delve level generator
//!
//! Builds one dungeon floor and prints it as text or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use delve_core::{GameRng, GenerationError, GenerationStats, GeneratorConfig, LevelBuilder, NoPopulation};

/// Generate a dungeon floor
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - generate a dungeon floor", long_about = None)]
struct Args {
    /// Random seed; a fresh one is drawn when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Floor index (0 is the top floor)
    #[arg(short = 'f', long = "floor", default_value_t = 0)]
    floor: u32,

    /// Grid width, overriding the config file
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Grid height, overriding the config file
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// JSON generator configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the level and statistics as JSON
    #[arg(long = "json")]
    json: bool,

    /// Leave rooms empty
    #[arg(long = "no-populate")]
    no_populate: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<GeneratorConfig, GenerationError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate()?;
    Ok(config)
}

fn print_summary(stats: &GenerationStats) {
    println!();
    println!("seed {}  floor {}", stats.seed, stats.floor);
    println!(
        "{} rooms, {} corridors, {} doors",
        stats.rooms, stats.corridors, stats.doors
    );
    println!(
        "{} short cycles sealed, {} corridors carved, {} rooms discarded",
        stats.sealed_cycles, stats.carved_corridors, stats.discarded_rooms
    );
}

fn run(args: &Args) -> Result<(), GenerationError> {
    let config = load_config(args)?;
    let rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!("generating floor {} with seed {}", args.floor, rng.seed());

    let mut builder = LevelBuilder::new(config, rng);
    if args.no_populate {
        builder = builder.with_population(NoPopulation);
    }
    let area = builder.build_level(args.floor)?;

    if args.json {
        let output = serde_json::json!({
            "stats": builder.last_stats(),
            "area": area,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", area.render_ascii());
        if let Some(stats) = builder.last_stats() {
            print_summary(stats);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("generation failed: {e}");
            eprintln!("delve: {e}");
            ExitCode::FAILURE
        }
    }
}
