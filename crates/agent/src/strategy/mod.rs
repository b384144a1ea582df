//! Strategies: pluggable policies that pick the next move.
//!
//! The scene calls [`Strategist::best_move_for_active_player`] once per tick
//! with a read-only [`GameModel`]. Every strategy answers with a
//! [`Decision`]; failures inside a strategy are logged and resolved to
//! [`Decision::stop`], never propagated.
//!
//! Strategies are held as `Box<dyn Strategist>` by the scene, so they can be
//! swapped at runtime (see [`build_strategist`]).
mod external;
mod history;
mod random;
mod tree;

pub use external::{ActionModel, ExternalModelStrategist, ModelInput, Prediction};
pub use history::HistoryTreeStrategist;
pub use random::{RandomMoveStrategist, RandomWeightedStrategist};
pub use tree::PredeterminedTreeStrategist;

use std::sync::Arc;

use puzzle_core::{AbstractGameState, AgentConfig, Decision, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assess::{Assessment, Assessor};
use crate::directive::TreeLabel;
use crate::error::{Result, StrategyError};
use crate::heuristics;
use crate::learning::TreeExecutor;
use crate::model::GameModel;
use crate::trees::PolicyTree;

/// A policy producing the next move for the active player.
pub trait Strategist: Send {
    /// Picks the next move. Never fails: errors degrade to `Stop`.
    fn best_move_for_active_player(&mut self, model: &dyn GameModel) -> Decision;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

/// Built-in strategies selectable by name.
///
/// The external-model strategy needs a model instance and is constructed
/// directly with [`ExternalModelStrategist::load`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StrategyKind {
    Random,
    RandomWeighted,
    Predetermined,
    History,
}

/// Builds the strategy `kind` names.
///
/// `executor` is only used by the learning strategy for its rebuilds.
pub fn build_strategist(
    kind: StrategyKind,
    config: &AgentConfig,
    executor: Arc<dyn TreeExecutor>,
) -> Box<dyn Strategist> {
    match kind {
        StrategyKind::Random => Box::new(RandomMoveStrategist::new(config)),
        StrategyKind::RandomWeighted => Box::new(RandomWeightedStrategist::new(config)),
        StrategyKind::Predetermined => Box::new(PredeterminedTreeStrategist::new(config)),
        StrategyKind::History => Box::new(HistoryTreeStrategist::new(config, executor)),
    }
}

/// RNG for a strategy: seeded from the config when a seed is set.
pub(crate) fn seeded_rng(config: &AgentConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Everything one tree-driven cycle produced.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TreeCycle {
    pub assessment: Assessment,
    pub derived: TreeLabel,
    pub decision: Decision,
}

/// Assess, traverse, resolve: the shared body of the tree strategies.
///
/// On a traversal miss the error carries the assessment so the caller can
/// record it.
pub(crate) fn run_tree(
    tree: &PolicyTree,
    assessor: &Assessor,
    state: &AbstractGameState,
    objects: &[Point],
    rng: &mut StdRng,
) -> std::result::Result<TreeCycle, (Assessment, StrategyError)> {
    let assessment = assessor.assess(state, objects);

    let derived = match tree.find_action(&assessment) {
        Ok(label) => *label,
        Err(error) => return Err((assessment, StrategyError::Traversal(error))),
    };
    tracing::debug!(label = %derived, "tree traversal reached leaf");

    let action = heuristics::resolve(derived, state, objects, rng);
    Ok(TreeCycle {
        assessment,
        derived,
        decision: Decision::new(action, 0),
    })
}

/// Extracts the abstract state or reports the invalid shape.
pub(crate) fn require_state(model: &dyn GameModel) -> Result<&AbstractGameState> {
    model.abstract_state().ok_or(StrategyError::InvalidState)
}
