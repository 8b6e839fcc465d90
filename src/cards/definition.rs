//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card as loaded
//! from the catalog. Board-side data (current hp, attacked this turn)
//! lives in `Minion`.

use serde::{Deserialize, Serialize};

/// Dense internal card identifier.
///
/// Assigned sequentially from 1 in ingestion order. `CardId(0)` is the
/// invalid id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// The invalid id.
    pub const INVALID: CardId = CardId(0);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardType {
    Minion,
    Spell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Unknown,
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Parse a catalog rarity string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FREE" => Some(Rarity::Free),
            "COMMON" => Some(Rarity::Common),
            "RARE" => Some(Rarity::Rare),
            "EPIC" => Some(Rarity::Epic),
            "LEGENDARY" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    #[default]
    None,
    Beast,
    Demon,
    Dragon,
    Mechanical,
    Murloc,
    Pirate,
    Totem,
}

impl Race {
    /// Parse a catalog race string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BEAST" => Some(Race::Beast),
            "DEMON" => Some(Race::Demon),
            "DRAGON" => Some(Race::Dragon),
            "MECHANICAL" => Some(Race::Mechanical),
            "MURLOC" => Some(Race::Murloc),
            "PIRATE" => Some(Race::Pirate),
            "TOTEM" => Some(Race::Totem),
            _ => None,
        }
    }
}

/// Keyword flags that change combat rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mechanics {
    pub taunt: bool,
    pub charge: bool,
    pub divine_shield: bool,
    pub stealth: bool,
}

/// Outcome of parsing one mechanic keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MechanicKeyword {
    /// Keyword sets a flag.
    Recognized,
    /// Known keyword without modelled behavior.
    Ignored,
    Unknown,
}

impl Mechanics {
    /// Apply a catalog mechanic keyword.
    pub fn apply_keyword(&mut self, keyword: &str) -> MechanicKeyword {
        match keyword {
            "TAUNT" => self.taunt = true,
            "CHARGE" => self.charge = true,
            "DIVINE_SHIELD" => self.divine_shield = true,
            "STEALTH" => self.stealth = true,
            "FORGETFUL" | "FREEZE" | "POISONOUS" | "WINDFURY" | "OVERLOAD" | "AURA"
            | "DEATHRATTLE" | "INSPIRE" | "BATTLECRY" | "SPELLPOWER" | "COMBO" | "ENRAGED"
            | "ADJACENT_BUFF" | "InvisibleDeathrattle" | "ImmuneToSpellpower" => {
                return MechanicKeyword::Ignored
            }
            _ => return MechanicKeyword::Unknown,
        }
        MechanicKeyword::Recognized
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_search::cards::{CardDefinition, CardId, Mechanics};
///
/// let wolf = CardDefinition::minion(CardId::new(1), "CS2_wolf", 2, 2, 1)
///     .with_mechanics(Mechanics { taunt: true, ..Mechanics::default() });
///
/// assert!(wolf.is_minion());
/// assert!(wolf.mechanics.taunt);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// External (catalog) id.
    pub original_id: String,

    pub card_type: CardType,
    pub cost: i32,

    /// Zero for non-minions.
    pub attack: i32,
    /// Zero for non-minions.
    pub health: i32,

    pub rarity: Rarity,
    pub race: Race,
    pub mechanics: Mechanics,
}

impl CardDefinition {
    /// Create a minion definition.
    #[must_use]
    pub fn minion(
        id: CardId,
        original_id: impl Into<String>,
        cost: i32,
        attack: i32,
        health: i32,
    ) -> Self {
        Self {
            id,
            original_id: original_id.into(),
            card_type: CardType::Minion,
            cost,
            attack,
            health,
            rarity: Rarity::Unknown,
            race: Race::None,
            mechanics: Mechanics::default(),
        }
    }

    /// Create a spell definition.
    #[must_use]
    pub fn spell(id: CardId, original_id: impl Into<String>, cost: i32) -> Self {
        Self {
            card_type: CardType::Spell,
            ..Self::minion(id, original_id, cost, 0, 0)
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    #[must_use]
    pub fn with_mechanics(mut self, mechanics: Mechanics) -> Self {
        self.mechanics = mechanics;
        self
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        self.card_type == CardType::Minion
    }
}
