//! Game rules: the stage state machine and its shared context.
//!
//! - `GameContext`: catalog, behaviors, and rule limits shared read-only
//! - `dispatch`: routes each stage to its handler
//! - `GameOutcome`: result of a finished game and its rewards

mod context;
pub mod dispatch;
mod outcome;
mod stages;

pub use context::GameContext;
pub use dispatch::{acting_side, apply_move, enumerate_moves};
pub use outcome::GameOutcome;
