//! Error types for the decision engine.
//!
//! None of these cross [`Strategist::best_move_for_active_player`]: every
//! strategy logs them and resolves to [`Decision::stop`]. They are public so
//! lower-level helpers can report why a cycle fell back.
//!
//! [`Strategist::best_move_for_active_player`]: crate::Strategist::best_move_for_active_player
//! [`Decision::stop`]: puzzle_core::Decision::stop

use decision_tree::TreeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StrategyError>;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("game model does not expose an abstract puzzle state")]
    InvalidState,

    #[error("decision tree traversal failed")]
    Traversal(#[source] TreeError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Failures of an external prediction model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("failed to load model: {0}")]
    Load(String),

    #[error("prediction failed: {0}")]
    Prediction(String),

    #[error("model returned unrecognized label `{label}`")]
    UnknownLabel { label: String },
}

/// Failures while writing training data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write training data")]
    Io(#[from] std::io::Error),
}
