//! Shared read-only game context.

use std::sync::Arc;

use crate::cards::{CardCatalog, CardDefinition, CardId};
use crate::core::RulesConfig;
use crate::effects::BehaviorRegistry;

/// Everything the state machine reads but never writes: the card
/// catalog, per-card behaviors, and rule limits.
///
/// Built once, then shared by `Arc` across all search workers.
#[derive(Clone, Debug)]
pub struct GameContext {
    pub catalog: Arc<CardCatalog>,
    pub behaviors: BehaviorRegistry,
    pub rules: RulesConfig,
}

impl GameContext {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, behaviors: BehaviorRegistry, rules: RulesConfig) -> Self {
        Self {
            catalog,
            behaviors,
            rules,
        }
    }

    /// Context with no behaviors and default rules.
    #[must_use]
    pub fn with_catalog(catalog: Arc<CardCatalog>) -> Self {
        Self::new(catalog, BehaviorRegistry::new(), RulesConfig::default())
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_behaviors(mut self, behaviors: BehaviorRegistry) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Shorthand for `catalog.lookup`.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.catalog.lookup(id)
    }
}
