use crate::geometry::Point;

/// Outfit worn by the player. Some inputs only accept a specific costume.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Costume {
    #[default]
    Default,
    Bird,
    FlashDrive,
    Sorceress,
}

impl Costume {
    const CYCLE: [Costume; 4] = [
        Costume::Default,
        Costume::Bird,
        Costume::FlashDrive,
        Costume::Sorceress,
    ];

    fn index(self) -> usize {
        Self::CYCLE
            .iter()
            .position(|&c| c == self)
            .unwrap_or_default()
    }

    /// Next costume in declaration order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::CYCLE[(self.index() + 1) % Self::CYCLE.len()]
    }

    /// Previous costume in declaration order, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::CYCLE[(self.index() + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }
}

/// The controllable character as seen by the agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractPlayer {
    pub position: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costume: Costume,
    #[cfg_attr(feature = "serde", serde(default))]
    pub carrying_item: bool,
}

impl AbstractPlayer {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            costume: Costume::Default,
            carrying_item: false,
        }
    }

    pub fn with_costume(mut self, costume: Costume) -> Self {
        self.costume = costume;
        self
    }

    pub fn carrying(mut self, carrying_item: bool) -> Self {
        self.carrying_item = carrying_item;
        self
    }
}
