//! Concurrent Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! - **Shared tree**: every worker thread descends the same tree; edges and
//!   nodes are created lock-free where possible and under a per-node write
//!   lock where not
//! - **Determinized roots**: each pass starts from a board built by a
//!   `BoardInitializer` from a fresh seed
//! - **Configurable Policies**: selection (UCB1) and simulation (random,
//!   aggressive)
//! - **Budgets**: wall-clock time, pass count, or both
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use ccg_search::cards::CardCatalog;
//! use ccg_search::core::Board;
//! use ccg_search::mcts::{MCTSConfig, MCTSController, SearchBudget};
//! use ccg_search::rules::GameContext;
//!
//! let ctx = Arc::new(GameContext::with_catalog(Arc::new(CardCatalog::new())));
//! let rules = ctx.rules.clone();
//! let mut search = MCTSController::new(ctx, MCTSConfig::default());
//!
//! let result = search
//!     .run(SearchBudget::iterations(100), 2, &move |seed: u64| Board::new(&rules, seed), &mut |line| {
//!         println!("{line}");
//!     })
//!     .unwrap();
//!
//! assert!(result.best_move.is_some());
//! println!("{}", search.tree().stats());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{MCTSConfig, SearchBudget};
pub use node::{ChildNodeMap, Edge, EdgeSnapshot, EdgeStats, MCTSNode};
pub use policy::{
    heuristic_eval, AggressiveSimulation, RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1,
};
pub use search::{MCTSController, SearchResult};
pub use stats::{SearchStats, Statistics};
pub use tree::{MCTSTree, RootMoveStats, TreeStats};
