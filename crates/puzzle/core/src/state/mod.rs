//! Abstract level state.
//!
//! This module owns the lightweight snapshot the agent reasons about: the
//! player, the exit, and the input/output wiring. Collaborators capture it
//! from the live scene each tick; strategies only read it, except through
//! [`AbstractGameState::apply`] on their own clones when simulating moves.
mod player;
mod signal;

pub use player::{AbstractPlayer, Costume};
pub use signal::{AbstractSignalReceivable, AbstractSignalSender, InputKind};

use crate::config::AgentConfig;
use crate::evaluate::StateEvaluator;
use crate::geometry::{Point, euclidean_distance};
use crate::Action;

/// Snapshot of one level at one instant.
///
/// `Clone` is a deep copy: player, inputs and outputs are owned values, so
/// simulated branches never alias each other or the original.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractGameState {
    pub player: AbstractPlayer,
    pub exit: Point,
    /// `true` iff some input is wired to the exit.
    ///
    /// Derived from topology and refreshed by [`rebase`](Self::rebase) /
    /// [`refresh_escapable`](Self::refresh_escapable). [`apply`](Self::apply)
    /// does not touch it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub escapable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inputs: Vec<AbstractSignalSender>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<AbstractSignalReceivable>,
}

impl AbstractGameState {
    /// Creates a state and derives `escapable` from the wiring.
    pub fn new(
        player: AbstractPlayer,
        exit: Point,
        inputs: Vec<AbstractSignalSender>,
        outputs: Vec<AbstractSignalReceivable>,
    ) -> Self {
        let mut state = Self {
            player,
            exit,
            escapable: false,
            inputs,
            outputs,
        };
        state.refresh_escapable();
        state
    }

    /// Bulk-replaces exit and wiring from a fresh capture, then recomputes
    /// `escapable`.
    pub fn rebase(
        &mut self,
        exit: Point,
        inputs: Vec<AbstractSignalSender>,
        outputs: Vec<AbstractSignalReceivable>,
    ) {
        self.exit = exit;
        self.inputs = inputs;
        self.outputs = outputs;
        self.refresh_escapable();
    }

    /// Recomputes `escapable`: true iff at least one input feeds the exit.
    ///
    /// Activation state is irrelevant here; escapability reflects wiring.
    pub fn refresh_escapable(&mut self) {
        let exit = self.exit;
        self.escapable = self.inputs.iter().any(|input| input.feeds(exit));
    }

    /// Applies `action` to the abstract model.
    ///
    /// Movement shifts the player by one grid unit
    /// ([`AgentConfig::MOVE_STEP`], independent of the real tile size).
    /// Every other action is a no-op here; the live scene carries it out.
    pub fn apply(&mut self, action: Action) {
        if let Some((dx, dy)) = action.direction() {
            self.player.position = self
                .player
                .position
                .offset(dx * AgentConfig::MOVE_STEP, dy * AgentConfig::MOVE_STEP);
        }
    }

    /// Deep copy for speculative branches. Same as `clone()`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Goal predicate: `player` stands within [`AgentConfig::WIN_RADIUS`] of
    /// the exit and the level is escapable.
    pub fn is_win(&self, player: &AbstractPlayer) -> bool {
        euclidean_distance(player.position, self.exit) < AgentConfig::WIN_RADIUS && self.escapable
    }

    /// Scores the state for `player` with a pluggable evaluator.
    ///
    /// None of the built-in strategies consult this.
    pub fn score<E>(&self, player: &AbstractPlayer, evaluator: &E) -> i32
    where
        E: StateEvaluator + ?Sized,
    {
        evaluator.score(self, player)
    }

    /// Inputs whose outputs include the exit.
    pub fn exit_inputs(&self) -> impl Iterator<Item = &AbstractSignalSender> {
        let exit = self.exit;
        self.inputs.iter().filter(move |input| input.feeds(exit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lever_to(position: Point, target: Point) -> AbstractSignalSender {
        AbstractSignalSender::new(position, InputKind::Lever).with_outputs(vec![target])
    }

    fn state_at(
        player: Point,
        exit: Point,
        inputs: Vec<AbstractSignalSender>,
    ) -> AbstractGameState {
        AbstractGameState::new(AbstractPlayer::new(player), exit, inputs, Vec::new())
    }

    #[test]
    fn opposite_moves_cancel_out() {
        let start = Point::new(10.0, -20.0);
        let mut state = state_at(start, Point::ORIGIN, Vec::new());

        state.apply(Action::MoveUp);
        assert_eq!(state.player.position, Point::new(10.0, 44.0));
        state.apply(Action::MoveDown);
        assert_eq!(state.player.position, start);

        state.apply(Action::MoveLeft);
        assert_eq!(state.player.position, Point::new(-54.0, -20.0));
        state.apply(Action::MoveRight);
        assert_eq!(state.player.position, start);
    }

    #[test]
    fn non_movement_actions_are_noops() {
        let original = state_at(Point::new(5.0, 5.0), Point::ORIGIN, Vec::new());
        for action in Action::ALL.into_iter().filter(|a| !a.is_movement()) {
            let mut state = original.copy();
            state.apply(action);
            assert_eq!(state, original, "{action} changed the abstract state");
        }
    }

    #[test]
    fn mutating_a_copy_leaves_the_original_alone() {
        let exit = Point::new(0.0, 200.0);
        let original = state_at(
            Point::ORIGIN,
            exit,
            vec![lever_to(Point::new(0.0, 100.0), exit)],
        );

        let mut branch = original.copy();
        branch.apply(Action::MoveRight);
        branch.inputs[0].active = true;
        branch.outputs.push(AbstractSignalReceivable::new(exit, true));

        assert_eq!(original.player.position, Point::ORIGIN);
        assert!(!original.inputs[0].active);
        assert!(original.outputs.is_empty());
    }

    #[test]
    fn escapability_follows_wiring_not_activation() {
        let exit = Point::new(300.0, 0.0);
        assert!(!state_at(Point::ORIGIN, exit, Vec::new()).escapable);

        // Inactive input wired to the exit is enough
        let wired = state_at(Point::ORIGIN, exit, vec![lever_to(Point::new(50.0, 0.0), exit)]);
        assert!(wired.escapable);

        let elsewhere = state_at(
            Point::ORIGIN,
            exit,
            vec![lever_to(Point::new(50.0, 0.0), Point::new(1.0, 1.0))],
        );
        assert!(!elsewhere.escapable);
    }

    #[test]
    fn apply_does_not_refresh_escapability_but_rebase_does() {
        let exit = Point::new(300.0, 0.0);
        let mut state = state_at(Point::ORIGIN, exit, Vec::new());
        state.inputs.push(lever_to(Point::ORIGIN, exit));
        state.apply(Action::MoveUp);
        assert!(!state.escapable);

        let inputs = state.inputs.clone();
        state.rebase(exit, inputs, Vec::new());
        assert!(state.escapable);
    }

    #[test]
    fn win_requires_both_proximity_and_escapability() {
        let exit = Point::new(40.0, 0.0);
        let wired = vec![lever_to(Point::new(500.0, 0.0), exit)];

        let near_and_escapable = state_at(Point::ORIGIN, exit, wired.clone());
        assert!(near_and_escapable.is_win(&near_and_escapable.player));

        let near_not_escapable = state_at(Point::ORIGIN, exit, Vec::new());
        assert!(!near_not_escapable.is_win(&near_not_escapable.player));

        let far_and_escapable = state_at(Point::new(0.0, 64.0 + 40.0), exit, wired);
        assert!(!far_and_escapable.is_win(&far_and_escapable.player));
    }

    #[test]
    fn win_radius_is_strict() {
        let exit = Point::new(64.0, 0.0);
        let state = state_at(Point::ORIGIN, exit, vec![lever_to(Point::ORIGIN, exit)]);
        assert!(!state.is_win(&state.player));
    }
}
