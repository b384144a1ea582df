//! The decision loop: ask the strategist, step the world, repeat.

use puzzle_agent::Strategist;
use puzzle_core::Decision;
use tracing::info;

use crate::world::{PuzzleWorld, StepOutcome};

/// Summary of one episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeReport {
    /// Ticks actually played.
    pub ticks: u64,
    pub won: bool,
    /// Every decision, in order.
    pub decisions: Vec<Decision>,
    /// Ticks whose action changed nothing beyond the clock.
    pub idle_ticks: u64,
}

/// Runs `strategist` on `world` until the player wins or `max_ticks` ticks
/// have been played.
pub fn run_episode(
    world: &mut PuzzleWorld,
    strategist: &mut dyn Strategist,
    max_ticks: u64,
) -> EpisodeReport {
    let mut report = EpisodeReport::default();

    while !world.is_won() && report.ticks < max_ticks {
        let decision = strategist.best_move_for_active_player(world.scenario());
        if world.step(decision.action) == StepOutcome::NoEffect {
            report.idle_ticks += 1;
        }
        report.decisions.push(decision);
        report.ticks += 1;
    }
    report.won = world.is_won();

    info!(
        strategy = strategist.name(),
        ticks = report.ticks,
        won = report.won,
        idle_ticks = report.idle_ticks,
        "episode finished"
    );
    report
}
