//! Card instances - runtime card state.
//!
//! `Card` is a card sitting in a hand or deck. `Minion` is a card that
//! has been put on the battlefield and tracks its own combat state.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType, Mechanics};

/// A card in a hand or deck.
///
/// Ordered by id so decks can be kept in canonical sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub cost: i32,
    pub card_type: CardType,
}

impl Card {
    #[must_use]
    pub fn from_definition(definition: &CardDefinition) -> Self {
        Self {
            card_id: definition.id,
            cost: definition.cost,
            card_type: definition.card_type,
        }
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        self.card_type == CardType::Minion
    }
}

/// A minion on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Minion {
    pub card_id: CardId,
    pub attack: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mechanics: Mechanics,

    /// Already attacked this turn.
    pub attacked: bool,

    /// Entered the battlefield this turn.
    pub summoned_this_turn: bool,
}

impl Minion {
    /// A fresh minion as printed on the card.
    #[must_use]
    pub fn from_definition(definition: &CardDefinition) -> Self {
        Self {
            card_id: definition.id,
            attack: definition.attack,
            hp: definition.health,
            max_hp: definition.health,
            mechanics: definition.mechanics,
            attacked: false,
            summoned_this_turn: false,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Whether this minion may declare an attack now.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack > 0
            && !self.attacked
            && (!self.summoned_this_turn || self.mechanics.charge)
    }

    /// Whether the enemy may choose this minion as a defender.
    #[must_use]
    pub fn is_targetable(&self) -> bool {
        !self.mechanics.stealth
    }

    /// Deal damage, honoring divine shield. Returns damage actually taken.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        if self.mechanics.divine_shield {
            self.mechanics.divine_shield = false;
            return 0;
        }
        self.hp -= amount;
        amount
    }

    /// Restore hp up to the maximum. Returns hp restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.min(self.max_hp - self.hp).max(0);
        self.hp += restored;
        restored
    }

    /// Permanently raise attack and health.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack += attack;
        self.hp += health;
        self.max_hp += health;
    }

    /// Turn-start refresh.
    pub fn ready(&mut self) {
        self.attacked = false;
        self.summoned_this_turn = false;
    }
}
