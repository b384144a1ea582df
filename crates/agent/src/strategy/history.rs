use std::sync::Arc;

use puzzle_core::{Action, AgentConfig, Decision};
use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::{Strategist, TreeCycle, require_state, run_tree, seeded_rng};
use crate::assess::{Assessment, Assessor};
use crate::error::{Result, StrategyError};
use crate::history::{HistoryItem, HistoryLog};
use crate::learning::{Id3Inducer, TreeBuilder, TreeExecutor, TreeInducer};
use crate::model::GameModel;
use crate::trees::{self, PolicyTree};

/// Decision tree strategy that learns its tree from its own history.
///
/// Every cycle is recorded. Below [`AgentConfig::MIN_TRAINING_SAMPLES`]
/// items the trivial fallback tree is used. From then on each cycle uses the
/// most recently published learned tree and, every `rebuild_every` recorded
/// items, dispatches a rebuild whose result shows up in a later cycle.
#[derive(Debug)]
pub struct HistoryTreeStrategist {
    history: HistoryLog,
    builder: TreeBuilder,
    fallback: Arc<PolicyTree>,
    assessor: Assessor,
    rng: StdRng,
    rebuild_every: usize,
    /// Items recorded since the last dispatched rebuild.
    pending: usize,
}

impl HistoryTreeStrategist {
    /// Learns with [`Id3Inducer`].
    pub fn new(config: &AgentConfig, executor: Arc<dyn TreeExecutor>) -> Self {
        Self::with_inducer(config, executor, Arc::new(Id3Inducer))
    }

    /// A history capacity below [`AgentConfig::MIN_TRAINING_SAMPLES`] is
    /// raised to it.
    pub fn with_inducer(
        config: &AgentConfig,
        executor: Arc<dyn TreeExecutor>,
        inducer: Arc<dyn TreeInducer>,
    ) -> Self {
        let capacity = config.history_capacity.map(|capacity| {
            if capacity < AgentConfig::MIN_TRAINING_SAMPLES {
                warn!(
                    capacity,
                    required = AgentConfig::MIN_TRAINING_SAMPLES,
                    "history capacity below training threshold, raising it"
                );
                AgentConfig::MIN_TRAINING_SAMPLES
            } else {
                capacity
            }
        });

        Self {
            history: HistoryLog::new(capacity),
            builder: TreeBuilder::new(inducer, executor),
            fallback: Arc::new(trees::fallback()),
            assessor: Assessor::new(config.costumes.clone()),
            rng: seeded_rng(config),
            rebuild_every: config.rebuild_every.max(1),
            pending: 0,
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The latest learned tree (the fallback until the first rebuild lands).
    pub fn learned_tree(&self) -> Arc<PolicyTree> {
        self.builder.current()
    }

    /// Receiver notified whenever a learned tree is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PolicyTree>> {
        self.builder.subscribe()
    }

    pub fn is_rebuilding(&self) -> bool {
        self.builder.is_building()
    }

    /// The tree for this cycle.
    ///
    /// Below the training threshold this is the trivial fallback tree. At or
    /// above it, the currently published tree is returned and a rebuild may
    /// be dispatched; the rebuild never affects the tree returned here.
    pub fn make_decision_tree(&mut self) -> Arc<PolicyTree> {
        let history_len = self.history.len();
        if history_len < AgentConfig::MIN_TRAINING_SAMPLES {
            warn!(
                history_len,
                required = AgentConfig::MIN_TRAINING_SAMPLES,
                "insufficient training data, using fallback tree"
            );
            return Arc::clone(&self.fallback);
        }

        let tree = self.builder.current();
        if self.pending >= self.rebuild_every
            && self.builder.request_rebuild(self.history.snapshot())
        {
            self.pending = 0;
        }
        tree
    }

    /// Records a demonstrated `action` (e.g. played by a human) for the
    /// state in `model`.
    pub fn record_demonstration(&mut self, model: &dyn GameModel, action: Action) -> Result<()> {
        let state = require_state(model)?;
        let assessment = self.assessor.assess(state, model.interactable_objects());
        self.record(HistoryItem::new(
            assessment,
            action.into(),
            Decision::new(action, 0),
            0,
        ));
        Ok(())
    }

    fn record(&mut self, item: HistoryItem) {
        self.history.push(item);
        self.pending += 1;
    }

    /// Penalty entry for an assessment the tree could not classify.
    fn record_failure(&mut self, assessment: Assessment) {
        self.record(HistoryItem::new(
            assessment,
            Action::Stop.into(),
            Decision::stop(),
            AgentConfig::FAILURE_PENALTY,
        ));
    }

    /// Records the outcome of one tree cycle and returns the move to play.
    fn finish_cycle(
        &mut self,
        outcome: std::result::Result<TreeCycle, (Assessment, StrategyError)>,
    ) -> Decision {
        match outcome {
            Ok(cycle) => {
                self.record(HistoryItem::new(
                    cycle.assessment,
                    cycle.derived,
                    cycle.decision,
                    0,
                ));
                debug!(
                    action = %cycle.decision.action,
                    history_len = self.history.len(),
                    "recorded decision"
                );
                cycle.decision
            }
            Err((assessment, error)) => {
                warn!(%error, "cannot decide, recording penalty and stopping");
                self.record_failure(assessment);
                Decision::stop()
            }
        }
    }
}

impl Strategist for HistoryTreeStrategist {
    fn best_move_for_active_player(&mut self, model: &dyn GameModel) -> Decision {
        let state = match require_state(model) {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "cannot decide, stopping");
                return Decision::stop();
            }
        };

        let tree = self.make_decision_tree();
        let outcome = run_tree(
            &tree,
            &self.assessor,
            state,
            model.interactable_objects(),
            &mut self.rng,
        );
        self.finish_cycle(outcome)
    }

    fn name(&self) -> &'static str {
        "history"
    }
}
