//! Game setup: factories for the root boards the search starts from.

mod initializer;

pub use initializer::{BoardInitializer, DeckInitializer};
