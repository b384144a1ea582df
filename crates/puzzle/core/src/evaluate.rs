//! Pluggable state scoring.
//!
//! [`AbstractGameState::score`](crate::AbstractGameState::score) delegates
//! here. The default [`RandomEvaluator`] returns a random integer regardless
//! of input; it is a placeholder extension point, and no built-in strategy
//! depends on its result.

use rand::Rng;

use crate::state::{AbstractGameState, AbstractPlayer};

/// Scores a state from one player's point of view. Higher is better.
pub trait StateEvaluator: Send + Sync {
    fn score(&self, state: &AbstractGameState, player: &AbstractPlayer) -> i32;
}

/// Placeholder evaluator: a uniformly random score in `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct RandomEvaluator {
    pub min: i32,
    pub max: i32,
}

impl Default for RandomEvaluator {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl StateEvaluator for RandomEvaluator {
    fn score(&self, _state: &AbstractGameState, _player: &AbstractPlayer) -> i32 {
        rand::rng().random_range(self.min..=self.max)
    }
}

/// Blanket implementation for closures, handy for tests and quick experiments.
impl<F> StateEvaluator for F
where
    F: Fn(&AbstractGameState, &AbstractPlayer) -> i32 + Send + Sync,
{
    fn score(&self, state: &AbstractGameState, player: &AbstractPlayer) -> i32 {
        self(state, player)
    }
}
