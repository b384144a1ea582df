//! Abstract puzzle-level model shared by the agent and its collaborators.
//!
//! `puzzle-core` defines the finite abstraction of a continuous level that
//! strategies reason about: geometry, the closed action vocabulary, the
//! abstract state with its pure simulation step, and the agent tunables.
//! It performs no I/O and holds no references into the live scene.
pub mod action;
pub mod config;
pub mod evaluate;
pub mod geometry;
pub mod scenario;
pub mod state;

pub use action::{Action, Decision};
pub use config::{AgentConfig, CostumeTable};
pub use evaluate::{RandomEvaluator, StateEvaluator};
pub use geometry::{Point, euclidean_distance, manhattan_distance};
pub use scenario::{Scenario, ScenarioError};
pub use state::{
    AbstractGameState, AbstractPlayer, AbstractSignalReceivable, AbstractSignalSender, Costume,
    InputKind,
};
