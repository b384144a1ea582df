//! What the scene hands to a strategy each tick.

use puzzle_core::{AbstractGameState, Point, Scenario};

/// Per-tick view of the level supplied by the collaborator.
///
/// A model that cannot produce an [`AbstractGameState`] is an invalid state
/// shape: tree-based strategies log it and answer `Stop`.
pub trait GameModel {
    /// The abstract snapshot, or `None` if this model has no puzzle state.
    fn abstract_state(&self) -> Option<&AbstractGameState>;

    /// Positions of interactable objects. Empty by default.
    fn interactable_objects(&self) -> &[Point] {
        &[]
    }
}

impl GameModel for AbstractGameState {
    fn abstract_state(&self) -> Option<&AbstractGameState> {
        Some(self)
    }
}

impl GameModel for Scenario {
    fn abstract_state(&self) -> Option<&AbstractGameState> {
        Some(&self.state)
    }

    fn interactable_objects(&self) -> &[Point] {
        &self.objects
    }
}

/// Borrowed state plus object list, for collaborators that keep them apart.
#[derive(Clone, Copy, Debug)]
pub struct SceneSnapshot<'a> {
    pub state: &'a AbstractGameState,
    pub objects: &'a [Point],
}

impl<'a> SceneSnapshot<'a> {
    pub fn new(state: &'a AbstractGameState, objects: &'a [Point]) -> Self {
        Self { state, objects }
    }
}

impl GameModel for SceneSnapshot<'_> {
    fn abstract_state(&self) -> Option<&AbstractGameState> {
        Some(self.state)
    }

    fn interactable_objects(&self) -> &[Point] {
        self.objects
    }
}
