//! Game results and rewards.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SideMap};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Won(Side),
    Draw,
}

impl GameOutcome {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameOutcome::Won(winner) if *winner == side)
    }

    /// Rewards per side: win 1, loss 0, draw 0.5.
    #[must_use]
    pub fn rewards(&self) -> SideMap<f64> {
        match self {
            GameOutcome::Won(winner) => SideMap::new(|s| if s == *winner { 1.0 } else { 0.0 }),
            GameOutcome::Draw => SideMap::with_value(0.5),
        }
    }
}
