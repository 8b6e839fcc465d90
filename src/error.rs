//! Error types.
//!
//! Three families, matching how failures are handled:
//!
//! - `CatalogError`: malformed card data. Loading fails as a whole.
//! - `GameError`: a state machine invariant was broken. The offending
//!   operation stops immediately.
//! - `SearchError`: a search run failed. No partial result is returned.

use std::path::PathBuf;

use thiserror::Error;

use crate::cards::CardId;
use crate::core::Stage;

/// Errors raised while building a card catalog.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read card file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed card json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card '{card}' is missing required field '{field}'")]
    MissingField { card: String, field: &'static str },

    #[error("card '{card}' has unknown race '{race}'")]
    UnknownRace { card: String, race: String },

    #[error("card '{card}' has unknown rarity '{rarity}'")]
    UnknownRarity { card: String, rarity: String },

    #[error("card '{card}' has unknown mechanic '{mechanic}'")]
    UnknownMechanic { card: String, mechanic: String },

    #[error("card id '{0}' appears more than once")]
    DuplicateOriginalId(String),
}

/// Invariant violations inside the stage state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("{stage} is a game flow stage; apply Move::GameFlow directly instead of enumerating moves")]
    GameFlowStage { stage: Stage },

    #[error("unhandled stage id {0}")]
    UnhandledStage(u8),

    #[error("move {mv} is not valid in {stage}")]
    InvalidMove { stage: Stage, mv: String },

    #[error("{stage} expected staged data but found {found}")]
    MissingStageData { stage: Stage, found: String },

    #[error("applying a move in decision stage {stage} consumed randomness")]
    RandomnessInDecisionStage { stage: Stage },

    #[error("the game is over ({stage})")]
    GameOver { stage: Stage },

    #[error("{stage} is not a decision stage")]
    NotDecisionStage { stage: Stage },

    #[error("{0} is not in the card catalog")]
    UnknownCard(CardId),
}

/// Failures of the search tree and controller.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SearchError {
    #[error("an edge for choice {choice} already exists")]
    DuplicateEdge { choice: i32 },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("search budget needs a time limit or an iteration cap")]
    UnboundedBudget,

    #[error("search worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// Convenience alias; defaults to state machine errors.
pub type Result<T, E = GameError> = std::result::Result<T, E>;
