//! Effect system for card behaviors.
//!
//! - `Effect`: Atomic changes (damage, heal, armor, draw, buff, secret)
//! - `Target`: Which characters an effect touches
//! - `EffectResolver`: Executes effects on a board
//! - `CardBehavior`: Per-card logic run when a minion is summoned
//! - `BehaviorRegistry`: Behaviors by card id
//!
//! ## Randomness
//!
//! Random targets and card draws consume the board's random source, so
//! they may only run inside game-flow stages. The resolver enforces this.

mod behavior;
mod effect;
mod resolver;
mod targeting;

pub use behavior::{Battlecry, BehaviorRegistry, CardBehavior};
pub use effect::Effect;
pub use resolver::{EffectContext, EffectResolver};
pub use targeting::{Character, Selection, Target, TargetSelector};
