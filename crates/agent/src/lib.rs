//! Decision engine for the puzzle agent.
//!
//! Each tick the scene hands a [`GameModel`] to the active [`Strategist`],
//! which answers with one [`Decision`]. The tree-based strategies run the
//! same pipeline:
//!
//! 1. [`Assessor`] reduces the abstract state to an [`Assessment`]
//! 2. A [`PolicyTree`] maps the assessment to a [`TreeLabel`]
//! 3. [`heuristics`] resolve meta-directives into concrete actions by
//!    one-ply local search
//!
//! Modules are organized by responsibility:
//! - [`assess`], [`directive`], [`heuristics`], [`trees`] form the pipeline
//! - [`strategy`] hosts the strategist trait and its implementations
//! - [`history`] and [`learning`] keep training data and rebuild trees off
//!   the decision path
//! - [`export`] writes training data for external tooling
//!
//! [`Decision`]: puzzle_core::Decision
pub mod assess;
pub mod directive;
pub mod error;
pub mod export;
pub mod heuristics;
pub mod history;
pub mod learning;
pub mod model;
pub mod strategy;
pub mod trees;

pub use assess::{Assessment, Assessor, Question};
pub use directive::{MetaDirective, TreeLabel, UnknownLabel};
pub use error::{ExportError, ModelError, Result, StrategyError};
pub use export::{CSV_HEADER, export_csv, write_csv};
pub use history::{HistoryItem, HistoryLog};
pub use learning::{
    Id3Inducer, InlineExecutor, TokioExecutor, TreeBuilder, TreeExecutor, TreeInducer,
};
pub use model::{GameModel, SceneSnapshot};
pub use strategy::{
    ActionModel, ExternalModelStrategist, HistoryTreeStrategist, ModelInput,
    PredeterminedTreeStrategist, Prediction, RandomMoveStrategist, RandomWeightedStrategist,
    Strategist, StrategyKind, build_strategist,
};
pub use trees::PolicyTree;
