//! Headless driver for the puzzle agent.
//!
//! Loads a level from JSON, lets a strategist play it tick by tick against
//! [`PuzzleWorld`], and optionally exports the learning strategist's history
//! as training data.
pub mod episode;
pub mod world;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use puzzle_core::Scenario;

pub use episode::{EpisodeReport, run_episode};
pub use world::{PuzzleWorld, StepOutcome};

/// Reads and validates a scenario file.
///
/// Escapability is re-derived from the wiring, whatever the file says.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let raw: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse scenario {}", path.display()))?;

    let scenario = Scenario::new(raw.state, raw.objects);
    scenario
        .validate()
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    Ok(scenario)
}
