//! Card catalog: immutable id → definition table.
//!
//! The catalog is built once (from JSON or programmatically), then shared
//! read-only behind an `Arc` by every board and search worker.
//!
//! ## Ingestion format
//!
//! A JSON array of records. Only `MINION` and `SPELL` records are kept;
//! everything else is skipped. Internal ids are assigned densely from 1 in
//! ingestion order.
//!
//! ```json
//! [
//!   { "type": "MINION", "id": "CS2_171", "cost": 1, "attack": 1, "health": 1,
//!     "race": "BEAST", "rarity": "FREE", "mechanics": ["CHARGE"] },
//!   { "type": "SPELL", "id": "CS2_029", "cost": 4 }
//! ]
//! ```

use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use super::definition::{CardDefinition, CardId, CardType, MechanicKeyword, Mechanics, Race, Rarity};
use crate::error::CatalogError;

/// One raw catalog record, as found in the JSON array.
///
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawCardRecord {
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub id: Option<String>,
    pub cost: Option<i32>,
    pub attack: Option<i32>,
    pub health: Option<i32>,
    pub race: Option<String>,
    pub rarity: Option<String>,
    #[serde(default)]
    pub mechanics: Vec<String>,
}

/// Immutable table of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_search::cards::CardCatalog;
///
/// let catalog = CardCatalog::from_json_str(
///     r#"[{"type": "MINION", "id": "CS2_231", "cost": 0, "attack": 1, "health": 1}]"#,
/// ).unwrap();
///
/// let id = catalog.lookup_by_original_id("CS2_231").unwrap();
/// assert_eq!(catalog.lookup(id).unwrap().health, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    /// Index `i` holds `CardId(i + 1)`.
    cards: Vec<CardDefinition>,
    by_original_id: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of card records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawCardRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Read and parse a card file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!("loaded {} cards from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Build from already-deserialized records. All-or-nothing.
    pub fn from_records(
        records: impl IntoIterator<Item = RawCardRecord>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        let mut skipped = 0usize;

        for record in records {
            match record.card_type.as_deref() {
                Some("MINION") => {
                    catalog.add_record(&record, CardType::Minion)?;
                }
                Some("SPELL") => {
                    catalog.add_record(&record, CardType::Spell)?;
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("skipped {skipped} records of unsupported card types");
        }
        info!(
            "card catalog ready: {} cards ({} minions)",
            catalog.len(),
            catalog.minions().count()
        );
        Ok(catalog)
    }

    fn add_record(
        &mut self,
        record: &RawCardRecord,
        card_type: CardType,
    ) -> Result<CardId, CatalogError> {
        let original_id = record.id.clone().ok_or_else(|| CatalogError::MissingField {
            card: "<unnamed>".to_string(),
            field: "id",
        })?;
        let missing = |field: &'static str| CatalogError::MissingField {
            card: original_id.clone(),
            field,
        };

        let cost = record.cost.ok_or_else(|| missing("cost"))?;
        let rarity = match record.rarity.as_deref() {
            None => Rarity::Unknown,
            Some(s) => Rarity::parse(s).ok_or_else(|| CatalogError::UnknownRarity {
                card: original_id.clone(),
                rarity: s.to_string(),
            })?,
        };

        let definition = match card_type {
            CardType::Spell => CardDefinition::spell(CardId::INVALID, original_id.as_str(), cost),
            CardType::Minion => {
                let attack = record.attack.ok_or_else(|| missing("attack"))?;
                let health = record.health.ok_or_else(|| missing("health"))?;
                let race = match record.race.as_deref() {
                    None => Race::None,
                    Some(s) => Race::parse(s).ok_or_else(|| CatalogError::UnknownRace {
                        card: original_id.clone(),
                        race: s.to_string(),
                    })?,
                };

                let mut mechanics = Mechanics::default();
                for keyword in &record.mechanics {
                    match mechanics.apply_keyword(keyword) {
                        MechanicKeyword::Recognized => {}
                        MechanicKeyword::Ignored => {
                            debug!("{original_id}: mechanic {keyword} is not simulated");
                        }
                        MechanicKeyword::Unknown => {
                            return Err(CatalogError::UnknownMechanic {
                                card: original_id.clone(),
                                mechanic: keyword.clone(),
                            });
                        }
                    }
                }

                CardDefinition::minion(CardId::INVALID, original_id.as_str(), cost, attack, health)
                    .with_race(race)
                    .with_mechanics(mechanics)
            }
        };

        self.insert(definition.with_rarity(rarity))
    }

    /// Add a definition, assigning it the next dense id.
    ///
    /// The definition's own `id` field is overwritten.
    pub fn insert(&mut self, mut definition: CardDefinition) -> Result<CardId, CatalogError> {
        if self.by_original_id.contains_key(&definition.original_id) {
            return Err(CatalogError::DuplicateOriginalId(definition.original_id));
        }

        // Ids fit in u32 for any catalog that fits in memory.
        let id = CardId::new(self.cards.len() as u32 + 1);
        definition.id = id;
        self.by_original_id.insert(definition.original_id.clone(), id);
        self.cards.push(definition);
        Ok(id)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn lookup(&self, id: CardId) -> Option<&CardDefinition> {
        let index = (id.raw() as usize).checked_sub(1)?;
        self.cards.get(index)
    }

    /// Map an external id to the internal id.
    #[must_use]
    pub fn lookup_by_original_id(&self, original_id: &str) -> Option<CardId> {
        self.by_original_id.get(original_id).copied()
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }

    /// All minion cards.
    pub fn minions(&self) -> impl Iterator<Item = &CardDefinition> {
        self.find(CardDefinition::is_minion)
    }
}
