use puzzle_core::{Action, AgentConfig, Decision};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::{Strategist, seeded_rng};
use crate::model::GameModel;

/// Uniformly random action out of the full vocabulary. Ignores the model.
#[derive(Debug)]
pub struct RandomMoveStrategist {
    rng: StdRng,
}

impl RandomMoveStrategist {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            rng: seeded_rng(config),
        }
    }
}

impl Strategist for RandomMoveStrategist {
    fn best_move_for_active_player(&mut self, _model: &dyn GameModel) -> Decision {
        let action = *Action::ALL.choose(&mut self.rng).unwrap_or(&Action::Stop);
        Decision::new(action, 0)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Scores every action randomly and picks the best.
#[derive(Debug)]
pub struct RandomWeightedStrategist {
    rng: StdRng,
    range: std::ops::RangeInclusive<i32>,
}

impl RandomWeightedStrategist {
    pub const DEFAULT_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

    pub fn new(config: &AgentConfig) -> Self {
        Self {
            rng: seeded_rng(config),
            range: Self::DEFAULT_RANGE,
        }
    }

    /// Overrides the value range. An empty range is ignored.
    pub fn with_range(mut self, range: std::ops::RangeInclusive<i32>) -> Self {
        if !range.is_empty() {
            self.range = range;
        }
        self
    }
}

impl Strategist for RandomWeightedStrategist {
    fn best_move_for_active_player(&mut self, _model: &dyn GameModel) -> Decision {
        let candidates: Vec<Decision> = Action::ALL
            .iter()
            .map(|&action| Decision::new(action, self.rng.random_range(self.range.clone())))
            .collect();
        pick_first_max(&candidates).unwrap_or_else(Decision::stop)
    }

    fn name(&self) -> &'static str {
        "random-weighted"
    }
}

/// Highest-valued decision; the earliest one wins a tie.
///
/// `Iterator::max_by_key` returns the *last* maximum, hence the explicit scan.
fn pick_first_max(candidates: &[Decision]) -> Option<Decision> {
    let mut best: Option<Decision> = None;
    for &candidate in candidates {
        if best.is_none_or(|b| candidate.value > b.value) {
            best = Some(candidate);
        }
    }
    best
}
