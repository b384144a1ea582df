//! Meta-directive resolution by one-ply local search.
//!
//! Closer-directives are resolved greedily: for each movement action (in the
//! fixed order up, down, left, right) the state is copied, the move applied,
//! and the Manhattan distance from the new player position to the target
//! measured. The first action reaching the minimum wins.
//!
//! The target is fixed before the search starts and not recomputed for each
//! branch, even though the branch moves the player.
//!
//! This is not pathfinding. The search can stall in local minima (e.g.
//! behind a wall); that is an accepted limitation.

use puzzle_core::{AbstractGameState, Action, Point, manhattan_distance};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::assess::{closest_input, closest_object};
use crate::directive::{MetaDirective, TreeLabel};

/// Turns a tree label into a concrete action.
///
/// Actions pass through unchanged; directives are resolved against `state`.
pub fn resolve<R>(
    label: TreeLabel,
    state: &AbstractGameState,
    objects: &[Point],
    rng: &mut R,
) -> Action
where
    R: Rng + ?Sized,
{
    match label {
        TreeLabel::Action(action) => action,
        TreeLabel::Directive(directive) => resolve_directive(directive, state, objects, rng),
    }
}

/// Resolves one meta-directive.
///
/// Returns `Stop` without searching when the directive's target (closest
/// input or object) does not exist.
pub fn resolve_directive<R>(
    directive: MetaDirective,
    state: &AbstractGameState,
    objects: &[Point],
    rng: &mut R,
) -> Action
where
    R: Rng + ?Sized,
{
    let target = match directive {
        MetaDirective::MoveRandom => return random_wander(rng),
        MetaDirective::MoveExitCloser => Some(state.exit),
        MetaDirective::MoveInputCloser => closest_input(state).map(|input| input.position),
        MetaDirective::MoveObjectCloser => closest_object(state, objects),
    };

    let action = match target {
        Some(target) => step_toward(state, target),
        None => {
            tracing::debug!(%directive, "no target for directive, stopping");
            Action::Stop
        }
    };

    tracing::debug!(%directive, %action, "resolved directive");
    action
}

/// Uniform pick among the four movements and `Stop`.
pub fn random_wander<R>(rng: &mut R) -> Action
where
    R: Rng + ?Sized,
{
    *Action::WANDER.choose(rng).unwrap_or(&Action::Stop)
}

/// One-ply search: the movement whose simulated result is closest to `target`.
///
/// Each candidate is applied to its own copy of `state`; `state` itself is
/// never modified.
pub fn step_toward(state: &AbstractGameState, target: Point) -> Action {
    let mut best_action = Action::Stop;
    let mut best_distance = f64::INFINITY;

    for action in Action::MOVEMENTS {
        let mut branch = state.copy();
        branch.apply(action);
        let distance = manhattan_distance(branch.player.position, target);

        // Strict comparison: on a tie the earlier action is kept
        if distance < best_distance {
            best_distance = distance;
            best_action = action;
        }
    }

    best_action
}

#[cfg(test)]
mod tests {
    use puzzle_core::{AbstractPlayer, AbstractSignalSender, InputKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn state(player: Point, exit: Point, inputs: Vec<AbstractSignalSender>) -> AbstractGameState {
        AbstractGameState::new(AbstractPlayer::new(player), exit, inputs, Vec::new())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn exit_closer_moves_right_toward_exit_on_the_right() {
        let s = state(Point::ORIGIN, Point::new(128.0, 0.0), Vec::new());
        assert_eq!(
            resolve_directive(MetaDirective::MoveExitCloser, &s, &[], &mut rng()),
            Action::MoveRight
        );
    }

    #[test]
    fn search_never_mutates_the_state() {
        let s = state(Point::new(3.0, 4.0), Point::new(-500.0, 0.0), Vec::new());
        let before = s.clone();
        assert_eq!(step_toward(&s, s.exit), Action::MoveLeft);
        assert_eq!(s, before);
    }

    #[test]
    fn ties_go_to_enumeration_order() {
        // Target straight on the player: every move is equally bad, up is first
        let s = state(Point::ORIGIN, Point::ORIGIN, Vec::new());
        assert_eq!(step_toward(&s, Point::ORIGIN), Action::MoveUp);

        // Diagonal target: up and right both reach distance 128, up is first
        assert_eq!(step_toward(&s, Point::new(96.0, 96.0)), Action::MoveUp);

        // Down and left tie, down is first
        assert_eq!(step_toward(&s, Point::new(-96.0, -96.0)), Action::MoveDown);
    }

    #[test]
    fn input_closer_targets_closest_input() {
        let s = state(
            Point::ORIGIN,
            Point::new(0.0, 1000.0),
            vec![
                AbstractSignalSender::new(Point::new(-300.0, 0.0), InputKind::Lever),
                AbstractSignalSender::new(Point::new(0.0, -200.0), InputKind::Lever),
            ],
        );
        assert_eq!(
            resolve_directive(MetaDirective::MoveInputCloser, &s, &[], &mut rng()),
            Action::MoveDown
        );
    }

    #[test]
    fn missing_targets_resolve_to_stop() {
        let s = state(Point::ORIGIN, Point::new(0.0, 1000.0), Vec::new());
        assert_eq!(
            resolve_directive(MetaDirective::MoveInputCloser, &s, &[], &mut rng()),
            Action::Stop
        );
        assert_eq!(
            resolve_directive(MetaDirective::MoveObjectCloser, &s, &[], &mut rng()),
            Action::Stop
        );
    }

    #[test]
    fn object_closer_uses_supplied_objects() {
        let s = state(Point::ORIGIN, Point::new(0.0, 1000.0), Vec::new());
        let objects = [Point::new(200.0, 0.0)];
        assert_eq!(
            resolve_directive(MetaDirective::MoveObjectCloser, &s, &objects, &mut rng()),
            Action::MoveRight
        );
    }

    #[test]
    fn random_wander_stays_in_pool() {
        let mut rng = rng();
        for _ in 0..200 {
            assert!(Action::WANDER.contains(&random_wander(&mut rng)));
        }
    }

    #[test]
    fn concrete_actions_pass_through() {
        let s = state(Point::ORIGIN, Point::ORIGIN, Vec::new());
        assert_eq!(
            resolve(TreeLabel::Action(Action::Drop), &s, &[], &mut rng()),
            Action::Drop
        );
    }
}
