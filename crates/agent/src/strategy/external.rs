//! Strategy backed by an opaque prediction model.
//!
//! The engine's only contract with the model: encode the assessment as the
//! model's input, ask for a prediction, parse the returned label. Any failure
//! along the way (load, prediction, unknown label) degrades to `Stop`.

use std::collections::BTreeMap;

use puzzle_core::{AgentConfig, Decision};
use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::{Strategist, require_state, seeded_rng};
use crate::assess::{Assessment, Assessor, Question};
use crate::directive::TreeLabel;
use crate::error::{ModelError, Result, StrategyError};
use crate::heuristics;
use crate::model::GameModel;

/// Model input: every assessment field by its camelCase name, encoded as
/// `"True"` / `"False"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelInput(BTreeMap<String, &'static str>);

impl ModelInput {
    pub fn encode(assessment: &Assessment) -> Self {
        Self(
            Question::ALL
                .iter()
                .map(|&q| (q.to_string(), if assessment.get(q) { "True" } else { "False" }))
                .collect(),
        )
    }

    pub fn get(&self, feature: &str) -> Option<&'static str> {
        self.0.get(feature).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// What a model answers with.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Prediction {
    pub label: String,
    /// Optional per-label probabilities.
    pub probabilities: Option<BTreeMap<String, f64>>,
}

impl Prediction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            probabilities: None,
        }
    }

    pub fn with_probabilities(mut self, probabilities: BTreeMap<String, f64>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Probability reported for the predicted label, if any.
    pub fn confidence(&self) -> Option<f64> {
        self.probabilities.as_ref()?.get(&self.label).copied()
    }
}

/// An external classifier mapping model inputs to action labels.
pub trait ActionModel: Send {
    fn predict(&mut self, input: &ModelInput) -> std::result::Result<Prediction, ModelError>;
}

/// Asks an [`ActionModel`] for every move.
///
/// Labels may name a concrete action or a meta-directive; directives are
/// resolved like tree leaves. The decision value is the label's probability
/// scaled to `0..=100` when the model reports one, otherwise `0`.
pub struct ExternalModelStrategist {
    model: Option<Box<dyn ActionModel>>,
    assessor: Assessor,
    rng: StdRng,
}

impl ExternalModelStrategist {
    /// Loads the model with `loader`.
    ///
    /// A load failure is logged and leaves the strategy without a model; it
    /// then answers `Stop` every cycle.
    pub fn load<F>(config: &AgentConfig, loader: F) -> Self
    where
        F: FnOnce() -> std::result::Result<Box<dyn ActionModel>, ModelError>,
    {
        let model = match loader() {
            Ok(model) => Some(model),
            Err(error) => {
                warn!(%error, "external model unavailable, strategy will stop");
                None
            }
        };
        Self {
            model,
            assessor: Assessor::new(config.costumes.clone()),
            rng: seeded_rng(config),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    fn decide(&mut self, model: &dyn GameModel) -> Result<Decision> {
        let state = require_state(model)?;
        let objects = model.interactable_objects();
        let input = ModelInput::encode(&self.assessor.assess(state, objects));

        let Some(action_model) = self.model.as_mut() else {
            return Err(ModelError::Load("no model loaded".to_string()).into());
        };
        let prediction = action_model.predict(&input)?;
        let label: TreeLabel = prediction.label.parse().map_err(|_| {
            StrategyError::from(ModelError::UnknownLabel {
                label: prediction.label.clone(),
            })
        })?;

        let action = heuristics::resolve(label, state, objects, &mut self.rng);
        let value = prediction
            .confidence()
            .map_or(0, |p| (p.clamp(0.0, 1.0) * 100.0).round() as i32);
        debug!(%label, %action, value, "model prediction");
        Ok(Decision::new(action, value))
    }
}

impl Strategist for ExternalModelStrategist {
    fn best_move_for_active_player(&mut self, model: &dyn GameModel) -> Decision {
        self.decide(model).unwrap_or_else(|error| {
            warn!(%error, "model decision failed, stopping");
            Decision::stop()
        })
    }

    fn name(&self) -> &'static str {
        "external-model"
    }
}
