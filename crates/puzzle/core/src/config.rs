use std::collections::BTreeMap;
use std::env;

use crate::state::{Costume, InputKind};

/// Agent configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Maximum number of history items kept for training. `None` keeps every
    /// item for the whole session. The learning strategist raises values below
    /// [`AgentConfig::MIN_TRAINING_SAMPLES`] to that threshold.
    pub history_capacity: Option<usize>,
    /// Trigger a tree rebuild every `rebuild_every` recorded items once the
    /// training threshold is met. `1` rebuilds on every cycle.
    pub rebuild_every: usize,
    /// Seed for strategy randomness. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Costume each input kind requires, if any.
    pub costumes: CostumeTable,
}

impl AgentConfig {
    // ===== fixed geometry of the abstract model =====
    /// Displacement of one simulated move. One grid unit, independent of the
    /// live scene's tile size.
    pub const MOVE_STEP: f64 = 64.0;
    /// Radius for "near an input" and "near an object".
    pub const NEAR_RADIUS: f64 = 64.0;
    /// Radius for "near the exit". Deliberately tighter than `NEAR_RADIUS`.
    pub const NEAR_EXIT_RADIUS: f64 = 36.0;
    /// Euclidean radius of the win predicate.
    pub const WIN_RADIUS: f64 = 64.0;

    // ===== learning =====
    /// History size below which the learning strategist uses the fallback tree.
    pub const MIN_TRAINING_SAMPLES: usize = 20;
    /// Score recorded for a cycle whose tree traversal failed.
    pub const FAILURE_PENALTY: i32 = -100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REBUILD_EVERY: usize = 1;

    pub fn new() -> Self {
        Self {
            history_capacity: None,
            rebuild_every: Self::DEFAULT_REBUILD_EVERY,
            seed: None,
            costumes: CostumeTable::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = Some(capacity);
        self
    }

    pub fn with_rebuild_every(mut self, every: usize) -> Self {
        self.rebuild_every = every.max(1);
        self
    }

    pub fn with_costumes(mut self, costumes: CostumeTable) -> Self {
        self.costumes = costumes;
        self
    }

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PUZZLE_AGENT_SEED` - RNG seed (default: OS entropy)
    /// - `PUZZLE_AGENT_HISTORY_CAPACITY` - history cap (default: unbounded)
    /// - `PUZZLE_AGENT_REBUILD_EVERY` - rebuild cadence (default: 1)
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("PUZZLE_AGENT_SEED") {
            config.seed = Some(seed);
        }
        if let Some(capacity) = read_env::<usize>("PUZZLE_AGENT_HISTORY_CAPACITY") {
            config.history_capacity = Some(capacity);
        }
        if let Some(every) = read_env::<usize>("PUZZLE_AGENT_REBUILD_EVERY") {
            config.rebuild_every = every.max(1);
        }

        config
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps input kinds to the costume needed to operate them.
///
/// This is level-design data, so it lives in configuration rather than in the
/// assessor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CostumeTable(BTreeMap<InputKind, Costume>);

impl CostumeTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, kind: InputKind, costume: Costume) -> Self {
        self.0.insert(kind, costume);
        self
    }

    /// Costume required by `kind`, if any.
    pub fn required(&self, kind: InputKind) -> Option<Costume> {
        self.0.get(&kind).copied()
    }
}

impl Default for CostumeTable {
    /// Software-locked computers take the flash drive, hardware-locked ones
    /// the sorceress.
    fn default() -> Self {
        Self::empty()
            .with(InputKind::ComputerLockedSoftware, Costume::FlashDrive)
            .with(InputKind::ComputerLockedHardware, Costume::Sorceress)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
