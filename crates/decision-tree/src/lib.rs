//! Lightweight decision tree library for turn-based game agents.
//!
//! A decision tree here is a rooted binary tree of boolean questions. Each
//! internal node asks one question, each leaf carries a label (an action or
//! a higher-level directive chosen by the caller's label type).
//!
//! - **Typed questions and labels**: both are generic, so callers use closed
//!   enums instead of raw strings
//! - **Deterministic**: evaluation is a pure walk from the root
//! - **Learnable**: [`induce`] builds a tree from labelled boolean examples
//!
//! # Architecture
//!
//! - [`DecisionTree`] / [`Node`]: Tree representation and traversal
//! - [`Answers`]: Source of answers to the questions asked during traversal
//! - [`builder`]: Helper functions for authoring trees by hand
//! - [`induce`]: ID3 induction from examples

pub mod answers;
pub mod builder;
pub mod error;
pub mod induce;
pub mod tree;

// Re-export core types for ergonomic API
pub use answers::Answers;
pub use error::{InductionError, TreeError};
pub use induce::induce;
pub use tree::{DecisionTree, Node};
