//! Card system: definitions, instances, and catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Dense identifier for card definitions (0 is invalid)
//! - `CardDefinition`: Static card data (cost, stats, race, rarity, mechanics)
//! - `Card`: A card in a hand or deck
//! - `Minion`: A card on the battlefield with combat state
//! - `CardCatalog`: Immutable definition lookup, loadable from JSON

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::{CardCatalog, RawCardRecord};
pub use definition::{CardDefinition, CardId, CardType, MechanicKeyword, Mechanics, Race, Rarity};
pub use instance::{Card, Minion};
