//! Root board factories.
//!
//! The search never sees the true hidden state. Each pass asks a
//! `BoardInitializer` for a fresh root board built from a seed, so every
//! pass searches a different determinization of hands and decks.

use std::sync::Arc;

use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{Board, RulesConfig, Side, SideMap, Stage};
use crate::error::{GameError, Result};

/// Builds the root board for one search pass.
///
/// Called concurrently from every worker, hence `Sync`.
pub trait BoardInitializer: Sync {
    fn initialize_board(&self, seed: u64) -> Board;
}

impl<F> BoardInitializer for F
where
    F: Fn(u64) -> Board + Sync,
{
    fn initialize_board(&self, seed: u64) -> Board {
        self(seed)
    }
}

/// Starts a game from two decks of catalog cards.
///
/// Opening hands are drawn at random with the seed, so each seed deals a
/// different game.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ccg_search::cards::{CardCatalog, CardDefinition, CardId};
/// use ccg_search::core::Side;
/// use ccg_search::games::{BoardInitializer, DeckInitializer};
///
/// let mut catalog = CardCatalog::new();
/// let wisp = catalog
///     .insert(CardDefinition::minion(CardId::INVALID, "CS2_231", 0, 1, 1))
///     .unwrap();
///
/// let init = DeckInitializer::new(Arc::new(catalog))
///     .deck(Side::Player, vec![wisp; 10])
///     .unwrap()
///     .opening_hand(Side::Player, 3);
///
/// let board = init.initialize_board(7);
/// assert_eq!(board.side(Side::Player).hand.len(), 3);
/// assert_eq!(board.side(Side::Player).deck.len(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct DeckInitializer {
    catalog: Arc<CardCatalog>,
    rules: RulesConfig,
    decks: SideMap<Vec<Card>>,
    opening_hands: SideMap<usize>,
    first: Side,
}

impl DeckInitializer {
    /// Empty decks, no opening hands, player moves first.
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            rules: RulesConfig::default(),
            decks: SideMap::default(),
            opening_hands: SideMap::with_value(0),
            first: Side::Player,
        }
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set a side's deck. Fails on ids missing from the catalog.
    pub fn deck(mut self, side: Side, cards: impl IntoIterator<Item = CardId>) -> Result<Self> {
        let deck = cards
            .into_iter()
            .map(|id| {
                self.catalog
                    .lookup(id)
                    .map(Card::from_definition)
                    .ok_or(GameError::UnknownCard(id))
            })
            .collect::<Result<Vec<_>>>()?;
        self.decks[side] = deck;
        Ok(self)
    }

    pub fn opening_hand(mut self, side: Side, size: usize) -> Self {
        self.opening_hands[side] = size;
        self
    }

    pub fn first(mut self, side: Side) -> Self {
        self.first = side;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }
}

impl BoardInitializer for DeckInitializer {
    fn initialize_board(&self, seed: u64) -> Board {
        let mut board = Board::new(&self.rules, seed);

        for side in Side::BOTH {
            board.side_mut(side).deck = self.decks[side].iter().copied().collect();
            for _ in 0..self.opening_hands[side] {
                board.draw_random_card(side, &self.rules);
            }
            // Drawing past an empty deck is not part of the deal.
            board.side_mut(side).stat.fatigue = 0;
            board.side_mut(side).stat.hp = self.rules.starting_hp;
        }

        board.stage = Stage::turn_start(self.first);
        board
    }
}
