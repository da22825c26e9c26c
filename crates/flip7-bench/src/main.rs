use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use flip7_bench::config::SimulationConfig;
use flip7_bench::logging::init_logging;
use flip7_bench::simulation::SimulationRunner;

const STRATEGY_HELP: &str = "\
Algorithms included:
  - Always Hit: Always takes another card until bust or Flip 7
  - Stop at X: Stops when reaching X points in a round
  - Conservative: Uses risk assessment based on cards seen
  - Aggressive: Aggressively goes for Flip 7
  - Adaptive: Adapts strategy based on opponents' scores";

/// Simulates many games of Flip 7 with different strategies competing.
#[derive(Debug, Parser)]
#[command(
    name = "flip7-sim",
    author,
    version,
    about = "Simulates multiple games of Flip 7 with different algorithms competing.",
    after_help = STRATEGY_HELP
)]
struct Cli {
    /// Number of games to simulate [default: 1000].
    #[arg(long, value_name = "N")]
    games: Option<usize>,

    /// Optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Master RNG seed for a reproducible run.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Also write the summary as JSON to this path.
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(games) = cli.games {
        config.games = games;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let games = config.games;
    let runner = SimulationRunner::new(config)?;

    println!("=== Flip 7 Simulator ===");
    println!("Running {games} games...\n");

    let summary = runner.run_with_progress(|progress| {
        println!("Completed {}/{} games", progress.completed, progress.total);
    })?;

    println!("{}", summary.render_table());

    let json_path = cli.json.or(outputs.summary_json);
    if let Some(path) = json_path {
        summary
            .write_json(&path)
            .with_context(|| format!("writing summary to {}", path.display()))?;
        println!("Summary JSON: {}", path.display());
    }

    Ok(())
}
