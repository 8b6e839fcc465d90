//! MCTS configuration parameters and search budgets.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Maximum nodes to allocate in the tree.
    /// Once reached, passes keep descending existing nodes but stop expanding.
    pub max_nodes: usize,

    /// Moves played in a rollout before falling back to the heuristic
    /// (0 = play to the end of the game).
    pub max_rollout_moves: u32,

    /// Seed for worker RNG streams and the fallback root board.
    pub seed: u64,

    /// How often the controller thread polls workers and reports progress.
    pub progress_interval: Duration,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_nodes: 1_000_000,
            max_rollout_moves: 0,
            seed: 42,
            progress_interval: Duration::from_millis(10),
        }
    }
}

impl MCTSConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_max_rollout_moves(mut self, moves: u32) -> Self {
        self.max_rollout_moves = moves;
        self
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// When a search run stops.
///
/// At least one limit must be set. With both set, whichever is hit first
/// ends the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Wall-clock limit.
    pub time: Option<Duration>,
    /// Cap on completed plus in-flight passes.
    pub iterations: Option<u64>,
}

impl SearchBudget {
    /// Budget limited by wall-clock time only.
    #[must_use]
    pub fn time(limit: Duration) -> Self {
        Self {
            time: Some(limit),
            iterations: None,
        }
    }

    #[must_use]
    pub fn seconds(secs: u64) -> Self {
        Self::time(Duration::from_secs(secs))
    }

    /// Budget limited by pass count only.
    #[must_use]
    pub fn iterations(cap: u64) -> Self {
        Self {
            time: None,
            iterations: Some(cap),
        }
    }

    pub fn with_time(mut self, limit: Duration) -> Self {
        self.time = Some(limit);
        self
    }

    pub fn with_iterations(mut self, cap: u64) -> Self {
        self.iterations = Some(cap);
        self
    }

    /// Reject budgets that would never stop.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.time.is_none() && self.iterations.is_none() {
            return Err(SearchError::UnboundedBudget);
        }
        Ok(())
    }
}
