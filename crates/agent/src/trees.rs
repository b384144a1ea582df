//! Hand-authored policy trees.
//!
//! # Naming Convention
//!
//! Trees are named by role: [`predetermined`] is the reference puzzle
//! policy, [`fallback`] is what the learning strategist uses until it has
//! enough training data.

use decision_tree::builder::{branch, leaf_from};
use decision_tree::{DecisionTree, Node};
use puzzle_core::Action;

use crate::assess::Question;
use crate::directive::{MetaDirective, TreeLabel};

/// Policy trees ask assessment questions and end in tree labels.
pub type PolicyTree = DecisionTree<Question, TreeLabel>;

type PolicyNode = Node<Question, TreeLabel>;

/// The reference puzzle-solving policy.
///
/// ```text
/// canEscape?
/// ├─ true  → nearExit? → true: Stop | false: MOVE_EXIT_CLOSER
/// └─ false → nearInput?
///            ├─ true  → inputActive?
///            │          ├─ true  → allInputsActive? → true: MOVE_EXIT_CLOSER | false: MOVE_RANDOM
///            │          └─ false → requiresObject?
///            │                     ├─ true  → hasObject? → true: Drop | false: MOVE_OBJECT_CLOSER
///            │                     └─ false → requiresCostume?
///            │                                ├─ true  → wearingCostume? → true: Activate | false: SwitchNextCostume
///            │                                └─ false → inputRelevant? → true: Activate | false: MOVE_RANDOM
///            └─ false → nearObject? → true: PickUp | false: MOVE_INPUT_CLOSER
/// ```
pub fn predetermined() -> PolicyTree {
    use MetaDirective::*;
    use Question::*;

    let escape: PolicyNode = branch(
        NearExit,
        leaf_from(Action::Stop),
        leaf_from(MoveExitCloser),
    );

    let active_input: PolicyNode = branch(
        AllInputsActive,
        leaf_from(MoveExitCloser),
        leaf_from(MoveRandom),
    );

    let plate: PolicyNode = branch(
        HasObject,
        leaf_from(Action::Drop),
        leaf_from(MoveObjectCloser),
    );

    let computer: PolicyNode = branch(
        WearingCostume,
        leaf_from(Action::Activate),
        leaf_from(Action::SwitchNextCostume),
    );

    let plain_input: PolicyNode = branch(
        InputRelevant,
        leaf_from(Action::Activate),
        leaf_from(MoveRandom),
    );

    let inactive_input: PolicyNode = branch(
        RequiresObject,
        plate,
        branch(RequiresCostume, computer, plain_input),
    );

    let at_input: PolicyNode = branch(InputActive, active_input, inactive_input);

    let away_from_input: PolicyNode = branch(
        NearObject,
        leaf_from(Action::PickUp),
        leaf_from(MoveInputCloser),
    );

    DecisionTree::new(branch(
        CanEscape,
        escape,
        branch(NearInput, at_input, away_from_input),
    ))
}

/// Trivial two-leaf tree: wander whatever the answer.
pub fn fallback() -> PolicyTree {
    DecisionTree::new(branch(
        Question::CanEscape,
        leaf_from(MetaDirective::MoveRandom),
        leaf_from(MetaDirective::MoveRandom),
    ))
}
