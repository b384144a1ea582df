use puzzle_core::{AgentConfig, Decision};
use rand::rngs::StdRng;
use tracing::warn;

use super::{Strategist, require_state, run_tree, seeded_rng};
use crate::assess::Assessor;
use crate::model::GameModel;
use crate::trees::{self, PolicyTree};

/// Follows a fixed decision tree. Records no history.
#[derive(Debug)]
pub struct PredeterminedTreeStrategist {
    tree: PolicyTree,
    assessor: Assessor,
    rng: StdRng,
}

impl PredeterminedTreeStrategist {
    /// Uses the reference tree from [`trees::predetermined`].
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_tree(config, trees::predetermined())
    }

    pub fn with_tree(config: &AgentConfig, tree: PolicyTree) -> Self {
        Self {
            tree,
            assessor: Assessor::new(config.costumes.clone()),
            rng: seeded_rng(config),
        }
    }

    pub fn tree(&self) -> &PolicyTree {
        &self.tree
    }
}

impl Strategist for PredeterminedTreeStrategist {
    fn best_move_for_active_player(&mut self, model: &dyn GameModel) -> Decision {
        let state = match require_state(model) {
            Ok(state) => state,
            Err(error) => {
                warn!(%error, "cannot decide, stopping");
                return Decision::stop();
            }
        };

        match run_tree(
            &self.tree,
            &self.assessor,
            state,
            model.interactable_objects(),
            &mut self.rng,
        ) {
            Ok(cycle) => cycle.decision,
            Err((_, error)) => {
                warn!(%error, "cannot decide, stopping");
                Decision::stop()
            }
        }
    }

    fn name(&self) -> &'static str {
        "predetermined"
    }
}

#[cfg(test)]
mod tests {
    use decision_tree::DecisionTree;
    use decision_tree::builder::{branch, leaf_from};
    use puzzle_core::{AbstractGameState, AbstractPlayer, Action, Point};

    use super::*;
    use crate::assess::Question;

    struct NoState;

    impl GameModel for NoState {
        fn abstract_state(&self) -> Option<&AbstractGameState> {
            None
        }
    }

    fn open_level(player: Point, exit: Point) -> AbstractGameState {
        AbstractGameState::new(AbstractPlayer::new(player), exit, Vec::new(), Vec::new())
    }

    #[test]
    fn default_tree_is_the_reference_tree() {
        let strategist = PredeterminedTreeStrategist::new(&AgentConfig::new());
        assert_eq!(*strategist.tree(), trees::predetermined());
    }

    #[test]
    fn invalid_state_stops() {
        let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
        assert_eq!(strategist.best_move_for_active_player(&NoState), Decision::stop());
    }

    #[test]
    fn heads_for_the_nearest_input_on_a_fresh_level() {
        let state = AbstractGameState::new(
            AbstractPlayer::new(Point::ORIGIN),
            Point::new(1000.0, 0.0),
            vec![puzzle_core::AbstractSignalSender::new(
                Point::new(-400.0, 0.0),
                puzzle_core::InputKind::Lever,
            )],
            Vec::new(),
        );
        let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
        assert_eq!(
            strategist.best_move_for_active_player(&state).action,
            Action::MoveLeft
        );
    }

    #[test]
    fn decisions_repeat_for_the_same_state() {
        let state = open_level(Point::ORIGIN, Point::new(0.0, -900.0));
        let mut strategist = PredeterminedTreeStrategist::new(&AgentConfig::new().with_seed(0));
        let first = strategist.best_move_for_active_player(&state);
        for _ in 0..10 {
            assert_eq!(strategist.best_move_for_active_player(&state), first);
        }
    }

    #[test]
    fn follows_a_custom_tree() {
        let tree: PolicyTree = DecisionTree::new(branch(
            Question::CanEscape,
            leaf_from(Action::Stop),
            leaf_from(Action::Activate),
        ));
        let mut strategist = PredeterminedTreeStrategist::with_tree(&AgentConfig::new(), tree);
        // Nothing wired to the exit: not escapable
        let state = open_level(Point::ORIGIN, Point::ORIGIN);
        assert_eq!(
            strategist.best_move_for_active_player(&state),
            Decision::new(Action::Activate, 0)
        );
    }
}
