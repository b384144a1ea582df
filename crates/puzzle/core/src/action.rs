//! The closed vocabulary of moves an agent may emit.
//!
//! Actions are symbolic: the abstract model only interprets the four
//! movement actions (see [`crate::AbstractGameState::apply`]). Everything
//! else is carried out by the live scene.

/// A concrete action handed to the game layer.
///
/// Labels (`Display` / `FromStr`) are the variant names, e.g. `MoveUp`.
/// These are the labels written to training exports and expected back from
/// external models.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Stop,
    SwitchNextCostume,
    SwitchPrevCostume,
    PickUp,
    Drop,
    DeployClone,
    RetractClone,
    Activate,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 12] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Stop,
        Action::SwitchNextCostume,
        Action::SwitchPrevCostume,
        Action::PickUp,
        Action::Drop,
        Action::DeployClone,
        Action::RetractClone,
        Action::Activate,
    ];

    /// The four movement actions in search order: up, down, left, right.
    pub const MOVEMENTS: [Action; 4] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
    ];

    /// Movement plus `Stop`, the pool for random wandering.
    pub const WANDER: [Action; 5] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Stop,
    ];

    /// Returns `true` for the four movement actions.
    #[inline]
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight
        )
    }

    /// Unit displacement `(dx, dy)` of a movement action, `None` otherwise.
    ///
    /// Y grows upward, so `MoveUp` is `(0, 1)`.
    pub fn direction(self) -> Option<(f64, f64)> {
        match self {
            Action::MoveUp => Some((0.0, 1.0)),
            Action::MoveDown => Some((0.0, -1.0)),
            Action::MoveLeft => Some((-1.0, 0.0)),
            Action::MoveRight => Some((1.0, 0.0)),
            _ => None,
        }
    }
}

/// An action paired with the score that ranked it.
///
/// `value` only matters to strategies that rank candidates (random weighted);
/// tree-based strategies emit `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub action: Action,
    pub value: i32,
}

impl Decision {
    pub const fn new(action: Action, value: i32) -> Self {
        Self { action, value }
    }

    /// The default decision every failure path resolves to: `Stop`, value 0.
    pub const fn stop() -> Self {
        Self::new(Action::Stop, 0)
    }
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        Self::new(action, 0)
    }
}
