//! State assessment: the sensory abstraction every strategy consumes.
//!
//! [`Assessor::assess`] turns an [`AbstractGameState`] (plus the loose object
//! positions) into an [`Assessment`], a fixed set of booleans. Decision trees
//! ask [`Question`]s about it, and training data is recorded from it.
//!
//! # Thresholds
//!
//! "Near" checks use straight-line distance against
//! [`AgentConfig::NEAR_RADIUS`], except the exit which uses the tighter
//! [`AgentConfig::NEAR_EXIT_RADIUS`]. "Closest" rankings use Manhattan
//! distance and keep the first minimum in iteration order.

use decision_tree::Answers;
use puzzle_core::{
    AbstractGameState, AbstractSignalSender, AgentConfig, CostumeTable, Point, euclidean_distance,
    manhattan_distance,
};
use serde::{Deserialize, Serialize};

/// A question a decision tree may ask about an [`Assessment`].
///
/// Labels are the camelCase field names used by training exports.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Question {
    CanEscape,
    NearExit,
    NearInput,
    InputActive,
    InputRelevant,
    RequiresObject,
    RequiresCostume,
    WearingCostume,
    HasObject,
    NearObject,
    AllInputsActive,
}

impl Question {
    /// Every question, in export column order.
    pub const ALL: [Question; 11] = [
        Question::CanEscape,
        Question::NearExit,
        Question::NearInput,
        Question::InputActive,
        Question::InputRelevant,
        Question::RequiresObject,
        Question::RequiresCostume,
        Question::WearingCostume,
        Question::HasObject,
        Question::NearObject,
        Question::AllInputsActive,
    ];

    /// The attributes offered to tree induction, in order.
    pub const TRAINING: [Question; 10] = [
        Question::CanEscape,
        Question::NearExit,
        Question::NearInput,
        Question::InputActive,
        Question::InputRelevant,
        Question::RequiresObject,
        Question::RequiresCostume,
        Question::HasObject,
        Question::NearObject,
        Question::AllInputsActive,
    ];
}

/// Boolean snapshot of a state at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub can_escape: bool,
    pub near_exit: bool,
    pub near_input: bool,
    pub input_active: bool,
    pub input_relevant: bool,
    pub requires_object: bool,
    pub requires_costume: bool,
    pub wearing_costume: bool,
    pub has_object: bool,
    pub near_object: bool,
    pub all_inputs_active: bool,
}

impl Assessment {
    /// Value of the field `question` refers to.
    pub fn get(&self, question: Question) -> bool {
        match question {
            Question::CanEscape => self.can_escape,
            Question::NearExit => self.near_exit,
            Question::NearInput => self.near_input,
            Question::InputActive => self.input_active,
            Question::InputRelevant => self.input_relevant,
            Question::RequiresObject => self.requires_object,
            Question::RequiresCostume => self.requires_costume,
            Question::WearingCostume => self.wearing_costume,
            Question::HasObject => self.has_object,
            Question::NearObject => self.near_object,
            Question::AllInputsActive => self.all_inputs_active,
        }
    }

    /// Feature row for `questions`, in the given order.
    pub fn features(&self, questions: &[Question]) -> Vec<bool> {
        questions.iter().map(|&q| self.get(q)).collect()
    }
}

/// Every question has an answer, so traversal over an assessment never
/// misses.
impl Answers<Question> for Assessment {
    #[inline]
    fn answer(&self, question: &Question) -> Option<bool> {
        Some(self.get(*question))
    }
}

/// Computes assessments. Holds the costume table the level design supplies.
#[derive(Clone, Debug, Default)]
pub struct Assessor {
    costumes: CostumeTable,
}

impl Assessor {
    pub fn new(costumes: CostumeTable) -> Self {
        Self { costumes }
    }

    /// Assesses `state` with `objects` as the interactable-object positions.
    pub fn assess(&self, state: &AbstractGameState, objects: &[Point]) -> Assessment {
        let player = &state.player;
        let input = closest_input(state);
        let object = closest_object(state, objects);

        let near =
            |target: Point, radius: f64| euclidean_distance(player.position, target) < radius;

        let assessment = Assessment {
            can_escape: state.is_win(player),
            near_exit: near(state.exit, AgentConfig::NEAR_EXIT_RADIUS),
            near_input: input.is_some_and(|i| near(i.position, AgentConfig::NEAR_RADIUS)),
            input_active: input.is_some_and(|i| i.active),
            input_relevant: input.is_some_and(|i| i.feeds(state.exit)),
            requires_object: input.is_some_and(|i| i.kind.requires_object()),
            requires_costume: input.is_some_and(|i| i.kind.requires_costume()),
            wearing_costume: input
                .and_then(|i| self.costumes.required(i.kind))
                .is_some_and(|costume| costume == player.costume),
            has_object: player.carrying_item,
            near_object: object.is_some_and(|o| near(o, AgentConfig::NEAR_RADIUS)),
            // Vacuously true when nothing is wired to the exit
            all_inputs_active: state.exit_inputs().all(|i| i.active),
        };

        tracing::debug!(?assessment, "assessed state");
        assessment
    }
}

/// Input with the smallest Manhattan distance to the player; the first one
/// wins a tie.
pub fn closest_input(state: &AbstractGameState) -> Option<&AbstractSignalSender> {
    let origin = state.player.position;
    first_min_by_distance(state.inputs.iter(), |input| {
        manhattan_distance(origin, input.position)
    })
}

/// Object position with the smallest Manhattan distance to the player; the
/// first one wins a tie.
pub fn closest_object(state: &AbstractGameState, objects: &[Point]) -> Option<Point> {
    let origin = state.player.position;
    first_min_by_distance(objects.iter().copied(), |&object| {
        manhattan_distance(origin, object)
    })
}

/// `Iterator::min_by` keeps the first minimum too, but it needs a total
/// order; an explicit scan lets NaN distances simply never win.
fn first_min_by_distance<T>(
    items: impl Iterator<Item = T>,
    distance: impl Fn(&T) -> f64,
) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let d = distance(&item);
        if best.as_ref().is_none_or(|(_, best_d)| d < *best_d) {
            best = Some((item, d));
        }
    }
    best.map(|(item, _)| item)
}
