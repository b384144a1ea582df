//! Puzzle agent simulator binary.
//!
//! Plays one scenario with the selected strategy and prints a summary.
//!
//! # Examples
//!
//! ```bash
//! # Fixed tree on the sample level
//! cargo run -p puzzle-sim -- --scenario crates/sim/scenarios/corridor.json
//!
//! # Learning strategy, exporting its history as training data
//! RUST_LOG=debug cargo run -p puzzle-sim -- \
//!     --scenario crates/sim/scenarios/plate.json --strategy history --export history.csv
//! ```
//!
//! Agent tunables are read from `PUZZLE_AGENT_*` environment variables (see
//! `AgentConfig::from_env`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use puzzle_agent::{
    HistoryTreeStrategist, StrategyKind, TokioExecutor, TreeExecutor, build_strategist,
    export_csv,
};
use puzzle_core::AgentConfig;
use puzzle_sim::{PuzzleWorld, load_scenario, run_episode};

/// Run a puzzle agent against a scenario file
#[derive(Parser)]
#[command(name = "puzzle-sim")]
#[command(about = "Headless simulator for the puzzle agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario JSON file
    #[arg(short, long, value_name = "FILE")]
    scenario: PathBuf,

    /// Strategy: random, random-weighted, predetermined, history
    #[arg(long, default_value = "predetermined")]
    strategy: StrategyKind,

    /// Tick limit
    #[arg(short, long, default_value_t = 500)]
    ticks: u64,

    /// RNG seed (overrides PUZZLE_AGENT_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the history strategy's training data to this CSV file
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AgentConfig::from_env();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let scenario = load_scenario(&cli.scenario)?;
    tracing::info!(
        scenario = %cli.scenario.display(),
        strategy = %cli.strategy,
        inputs = scenario.state.inputs.len(),
        objects = scenario.objects.len(),
        "starting episode"
    );

    let mut world = PuzzleWorld::new(scenario, config.costumes.clone());
    let executor: Arc<dyn TreeExecutor> =
        Arc::new(TokioExecutor::new(tokio::runtime::Handle::current()));

    let report = match cli.strategy {
        StrategyKind::History => {
            let mut strategist = HistoryTreeStrategist::new(&config, executor);
            let report = run_episode(&mut world, &mut strategist, cli.ticks);
            if let Some(path) = &cli.export {
                export_csv(path, strategist.history())
                    .with_context(|| format!("failed to export {}", path.display()))?;
            }
            report
        }
        kind => {
            if cli.export.is_some() {
                tracing::warn!(strategy = %kind, "--export only applies to the history strategy");
            }
            let mut strategist = build_strategist(kind, &config, executor);
            run_episode(&mut world, strategist.as_mut(), cli.ticks)
        }
    };

    println!(
        "{}: {} after {} ticks ({} idle)",
        cli.strategy,
        if report.won { "escaped" } else { "gave up" },
        report.ticks,
        report.idle_ticks
    );
    Ok(())
}
