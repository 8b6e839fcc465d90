//! # ccg-search
//!
//! A two-player collectible card game state machine, searched by a
//! concurrent Monte Carlo Tree Search.
//!
//! ## Design Principles
//!
//! 1. **Explicit Stages**: A turn is a sequence of stages. Decision stages
//!    enumerate moves for one side; game-flow stages are crossed with a
//!    seeded `Move::GameFlow`, so every random outcome is reproducible.
//!
//! 2. **Plain Values**: `Board` is cheap to clone (`im` vectors, `SmallVec`
//!    rows), comparable and hashable. Search workers each own their copy.
//!
//! 3. **Shared Read-Only Data**: The card catalog, card behaviors and rule
//!    limits live in a `GameContext` passed by reference or `Arc`.
//!
//! ## Architecture
//!
//! - **Stage Dispatcher**: Exhaustive `match` over `Stage`, routing to one
//!   handler per stage.
//!
//! - **Shared Tree MCTS**: Worker threads descend one tree; edges live in a
//!   per-node `RwLock` map, children in a `OnceLock`, statistics in atomics.
//!
//! ## Modules
//!
//! - `core`: Sides, stages, moves, board state, RNG, rule configuration
//! - `cards`: Card definitions, catalog loading, board-side instances
//! - `effects`: Card behaviors and the effects they resolve
//! - `rules`: Stage dispatcher, game context, outcomes
//! - `games`: Root board factories
//! - `mcts`: Monte Carlo Tree Search for AI
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod games;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    AttackTarget, Board, Move, RandomSource, RulesConfig, Side, SideMap, Stage, StageData,
    StageType,
};

pub use crate::cards::{Card, CardCatalog, CardDefinition, CardId, Minion};

pub use crate::effects::{Battlecry, BehaviorRegistry, CardBehavior, Effect, Target};

pub use crate::rules::{GameContext, GameOutcome};

pub use crate::games::{BoardInitializer, DeckInitializer};

pub use crate::mcts::{
    MCTSConfig, MCTSController, SearchBudget, SearchResult, SearchStats, TreeStats,
};

pub use crate::error::{CatalogError, GameError, SearchError};
