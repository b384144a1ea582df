use crate::geometry::Point;

/// Kind of signal sender placed in a level.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputKind {
    Lever,
    ComputerLockedSoftware,
    ComputerLockedHardware,
    Trigger,
    AlarmClock,
    PressurePlate,
}

impl InputKind {
    /// Pressure plates need an object resting on them.
    #[inline]
    pub fn requires_object(self) -> bool {
        matches!(self, InputKind::PressurePlate)
    }

    /// Locked computers only respond to a specific costume.
    #[inline]
    pub fn requires_costume(self) -> bool {
        matches!(
            self,
            InputKind::ComputerLockedSoftware | InputKind::ComputerLockedHardware
        )
    }
}

/// An input device (lever, computer, plate, ...).
///
/// `outputs` lists the *locations* of the receivers this input feeds. It is a
/// location join, not an ownership link: receivers live in
/// [`AbstractGameState::outputs`](crate::AbstractGameState::outputs).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractSignalSender {
    pub position: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub active: bool,
    pub kind: InputKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<Point>,
    /// Remaining ticks for timed inputs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timer: Option<i32>,
}

impl AbstractSignalSender {
    pub fn new(position: Point, kind: InputKind) -> Self {
        Self {
            position,
            active: false,
            kind,
            outputs: Vec::new(),
            timer: None,
        }
    }

    pub fn with_outputs(mut self, outputs: Vec<Point>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_timer(mut self, timer: i32) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Returns `true` if this input is wired to a receiver at `location`.
    #[inline]
    pub fn feeds(&self, location: Point) -> bool {
        self.outputs.contains(&location)
    }
}

/// An output device (door, exit gate, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbstractSignalReceivable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub active: bool,
    pub location: Point,
}

impl AbstractSignalReceivable {
    pub fn new(location: Point, active: bool) -> Self {
        Self { active, location }
    }
}
