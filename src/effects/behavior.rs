//! Per-card behavior providers.
//!
//! A `CardBehavior` runs when its card's minion enters the battlefield.
//! Behaviors are registered per `CardId` in a `BehaviorRegistry`, which is
//! read-only once the `GameContext` is built.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::resolver::{EffectContext, EffectResolver};
use super::Effect;
use crate::cards::{CardCatalog, CardId};
use crate::core::Board;
use crate::error::Result;

/// Effect logic attached to a card.
///
/// Implementations must be `Send + Sync`; one registry is shared by all
/// search workers.
pub trait CardBehavior: Send + Sync {
    /// Called after the minion is placed on the row, before deaths resolve.
    fn on_summon(&self, board: &mut Board, ctx: &EffectContext<'_>) -> Result<()>;
}

/// Data-driven behavior: resolve a fixed effect list on summon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Battlecry(pub Vec<Effect>);

impl CardBehavior for Battlecry {
    fn on_summon(&self, board: &mut Board, ctx: &EffectContext<'_>) -> Result<()> {
        EffectResolver::resolve_all(board, &self.0, ctx)
    }
}

/// Behaviors by card id.
///
/// ## Example
///
/// ```
/// use ccg_search::cards::CardId;
/// use ccg_search::effects::{Battlecry, BehaviorRegistry, Effect};
///
/// let mut behaviors = BehaviorRegistry::new();
/// behaviors.register(CardId::new(1), Battlecry(vec![Effect::GainArmor { amount: 2 }]));
///
/// assert!(behaviors.get(CardId::new(1)).is_some());
/// assert!(behaviors.get(CardId::new(2)).is_none());
/// ```
#[derive(Clone, Default)]
pub struct BehaviorRegistry {
    behaviors: FxHashMap<CardId, Arc<dyn CardBehavior>>,
}

impl BehaviorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a behavior, replacing any previous one for `card`.
    pub fn register(&mut self, card: CardId, behavior: impl CardBehavior + 'static) {
        self.behaviors.insert(card, Arc::new(behavior));
    }

    /// Register by external id. Returns the internal id, or `None` if the
    /// catalog does not know `original_id`.
    pub fn register_by_original_id(
        &mut self,
        catalog: &CardCatalog,
        original_id: &str,
        behavior: impl CardBehavior + 'static,
    ) -> Option<CardId> {
        let id = catalog.lookup_by_original_id(original_id)?;
        self.register(id, behavior);
        Some(id)
    }

    #[must_use]
    pub fn get(&self, card: CardId) -> Option<&dyn CardBehavior> {
        self.behaviors.get(&card).map(|b| b.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("cards", &self.behaviors.len())
            .finish()
    }
}
