//! Core types: sides, stages, moves, board state, RNG, configuration.
//!
//! Everything here is a plain value. State transitions are driven by the
//! `rules` dispatcher through `Board::apply_move`.

pub mod board;
pub mod config;
pub mod moves;
pub mod rng;
pub mod side;
pub mod stage;

pub use board::{Board, Crystal, Deck, HeroStat, MinionRow, SideState};
pub use config::{RulesConfig, MAX_INDEXED_SLOTS};
pub use moves::{AttackTarget, Move};
pub use rng::{RandomSource, RandomSourceState};
pub use side::{Side, SideMap};
pub use stage::{Stage, StageData, StageType};
