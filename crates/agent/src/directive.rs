//! Decision-tree leaf labels.
//!
//! A leaf is either a concrete [`Action`] or a [`MetaDirective`] that the
//! resolver turns into an action in the same cycle.

use std::fmt;
use std::str::FromStr;

use puzzle_core::Action;
use serde::{Deserialize, Serialize};

/// A symbolic "move closer" style instruction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetaDirective {
    /// Wander: any movement or stop, uniformly.
    MoveRandom,
    MoveExitCloser,
    MoveInputCloser,
    MoveObjectCloser,
}

/// What a decision tree leaf holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeLabel {
    Directive(MetaDirective),
    Action(Action),
}

impl TreeLabel {
    /// Returns the directive, if this label needs resolving.
    pub fn directive(self) -> Option<MetaDirective> {
        match self {
            TreeLabel::Directive(directive) => Some(directive),
            TreeLabel::Action(_) => None,
        }
    }
}

impl From<MetaDirective> for TreeLabel {
    fn from(directive: MetaDirective) -> Self {
        TreeLabel::Directive(directive)
    }
}

impl From<Action> for TreeLabel {
    fn from(action: Action) -> Self {
        TreeLabel::Action(action)
    }
}

impl fmt::Display for TreeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeLabel::Directive(directive) => fmt::Display::fmt(directive, f),
            TreeLabel::Action(action) => fmt::Display::fmt(action, f),
        }
    }
}

/// Label text did not name a directive or an action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized tree label `{0}`")]
pub struct UnknownLabel(pub String);

impl FromStr for TreeLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaDirective::from_str(s)
            .map(TreeLabel::Directive)
            .or_else(|_| Action::from_str(s).map(TreeLabel::Action))
            .map_err(|_| UnknownLabel(s.to_string()))
    }
}
