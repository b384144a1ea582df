//! Level snapshots bundled with the interactable objects lying around.
//!
//! Object positions are not part of [`AbstractGameState`]'s core fields;
//! collaborators supply them alongside the state. A [`Scenario`] keeps the
//! two together, e.g. when a level is loaded from a file.

use crate::geometry::Point;
use crate::state::AbstractGameState;

/// Invalid scenario data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("{what} has a non-finite coordinate {point}")]
    NonFinite { what: &'static str, point: Point },

    #[error("input {index} has timer {timer}, timers must be positive")]
    InvalidTimer { index: usize, timer: i32 },
}

/// A level: abstract state plus loose object positions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub state: AbstractGameState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: Vec<Point>,
}

impl Scenario {
    /// Bundles a state with its objects and re-derives escapability, since
    /// deserialized data may carry a stale flag.
    pub fn new(mut state: AbstractGameState, objects: Vec<Point>) -> Self {
        state.refresh_escapable();
        Self { state, objects }
    }

    /// Checks coordinates and timers.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let check = |what: &'static str, point: Point| {
            if point.is_finite() {
                Ok(())
            } else {
                Err(ScenarioError::NonFinite { what, point })
            }
        };

        check("player", self.state.player.position)?;
        check("exit", self.state.exit)?;
        for (index, input) in self.state.inputs.iter().enumerate() {
            check("input", input.position)?;
            for &output in &input.outputs {
                check("input output", output)?;
            }
            if let Some(timer) = input.timer
                && timer <= 0
            {
                return Err(ScenarioError::InvalidTimer { index, timer });
            }
        }
        for output in &self.state.outputs {
            check("output", output.location)?;
        }
        for &object in &self.objects {
            check("object", object)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AbstractPlayer, AbstractSignalSender, InputKind};

    fn base_state() -> AbstractGameState {
        AbstractGameState::new(
            AbstractPlayer::new(Point::ORIGIN),
            Point::new(0.0, 200.0),
            vec![
                AbstractSignalSender::new(Point::new(0.0, 100.0), InputKind::Lever)
                    .with_outputs(vec![Point::new(0.0, 200.0)]),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn new_rederives_stale_escapability() {
        let mut state = base_state();
        state.escapable = false;
        let scenario = Scenario::new(state, Vec::new());
        assert!(scenario.state.escapable);
    }

    #[test]
    fn rejects_non_finite_objects() {
        let scenario = Scenario::new(base_state(), vec![Point::new(f64::NAN, 0.0)]);
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::NonFinite { what: "object", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_timers() {
        let mut state = base_state();
        state.inputs[0].timer = Some(0);
        assert_eq!(
            Scenario::new(state, Vec::new()).validate(),
            Err(ScenarioError::InvalidTimer { index: 0, timer: 0 })
        );
        assert_eq!(Scenario::new(base_state(), Vec::new()).validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_json_with_defaults() {
        let json = r#"{
            "state": {
                "player": { "position": { "x": 0.0, "y": 0.0 } },
                "exit": { "x": 0.0, "y": 200.0 },
                "inputs": [
                    { "position": { "x": 0.0, "y": 100.0 }, "kind": "Lever",
                      "outputs": [{ "x": 0.0, "y": 200.0 }] }
                ]
            }
        }"#;
        let parsed: Scenario = serde_json::from_str(json).unwrap();
        let scenario = Scenario::new(parsed.state, parsed.objects);
        assert!(scenario.state.escapable);
        assert!(scenario.objects.is_empty());
        assert!(!scenario.state.inputs[0].active);
    }
}
