//! Board state: the complete, cloneable game snapshot.
//!
//! ## Layout
//!
//! - Per side (`SideMap<SideState>`): hero stats, hand, deck, minion row,
//!   secrets
//! - `stage`: current turn phase
//! - `data`: payload staged between two stages of one logical turn
//! - `random`: the board's random source
//! - `turn`: completed turn counter
//!
//! Hands and decks use `im` persistent vectors, so cloning a board for a
//! search pass is cheap.
//!
//! ## Equality
//!
//! Decks are kept sorted and secrets live in a `BTreeSet`, so two boards
//! that differ only in deck order or secret insertion order compare equal.
//! The random source compares by seed and stream position.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use im::Vector;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::RulesConfig;
use super::moves::Move;
use super::rng::RandomSource;
use super::side::{Side, SideMap};
use super::stage::{Stage, StageData};
use crate::cards::{Card, CardId, Minion};
use crate::error::Result;
use crate::rules::{dispatch, GameContext, GameOutcome};

/// Minion row. Capacity is enforced by `RulesConfig::max_minions`.
pub type MinionRow = SmallVec<[Minion; 7]>;

/// Mana crystals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crystal {
    pub current: i32,
    pub total: i32,
}

/// Hero statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroStat {
    pub hp: i32,
    pub max_hp: i32,
    pub armor: i32,
    pub crystal: Crystal,
    /// Damage dealt by the next draw from an empty deck.
    pub fatigue: i32,
}

impl HeroStat {
    #[must_use]
    pub fn new(hp: i32) -> Self {
        Self {
            hp,
            max_hp: hp,
            ..Self::default()
        }
    }

    /// Damage that armor absorbs first.
    pub fn take_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        let absorbed = amount.min(self.armor);
        self.armor -= absorbed;
        self.hp -= amount - absorbed;
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Multiset of cards kept in canonical sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping sorted order.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert_ord(card);
    }

    /// Remove and return a uniformly random card.
    pub fn remove_random(&mut self, random: &mut RandomSource) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = random.gen_range_usize(0..self.cards.len());
        Some(self.cards.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut deck = Deck::new();
        for card in iter {
            deck.insert(card);
        }
        deck
    }
}

/// Everything one side owns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideState {
    pub stat: HeroStat,
    /// Order is game-meaningful.
    pub hand: Vector<Card>,
    pub deck: Deck,
    pub minions: MinionRow,
    pub secrets: BTreeSet<CardId>,
}

impl SideState {
    #[must_use]
    pub fn new(hp: i32) -> Self {
        Self {
            stat: HeroStat::new(hp),
            ..Self::default()
        }
    }

    /// Any non-stealthed taunt minion on the row.
    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.minions
            .iter()
            .any(|m| m.mechanics.taunt && m.is_targetable())
    }
}

/// Complete game state.
///
/// ## Example
///
/// ```
/// use ccg_search::core::{Board, RulesConfig, Side, Stage};
///
/// let board = Board::new(&RulesConfig::default(), 42);
///
/// assert_eq!(board.stage, Stage::PlayerTurnStart);
/// assert_eq!(board.side(Side::Opponent).stat.hp, 30);
/// assert_eq!(board, board.clone());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub sides: SideMap<SideState>,
    pub stage: Stage,
    pub data: StageData,
    pub random: RandomSource,
    pub turn: u32,
}

impl Board {
    /// Empty board at the player's first turn start.
    #[must_use]
    pub fn new(rules: &RulesConfig, seed: u64) -> Self {
        Self {
            sides: SideMap::new(|_| SideState::new(rules.starting_hp)),
            stage: Stage::PlayerTurnStart,
            data: StageData::None,
            random: RandomSource::new(seed),
            turn: 0,
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    // === State machine ===

    /// Legal moves in the current stage.
    ///
    /// Empty on game end; an error on game-flow stages.
    pub fn enumerate_moves(&self, ctx: &GameContext) -> Result<Vec<Move>> {
        dispatch::enumerate_moves(ctx, self)
    }

    /// Apply a move in place. Returns whether no randomness was consumed.
    pub fn apply_move(&mut self, ctx: &GameContext, mv: &Move) -> Result<bool> {
        dispatch::apply_move(ctx, self, mv)
    }

    /// Cross game-flow stages until a decision or game-end stage, drawing
    /// each game-flow seed from `random`.
    pub fn advance_game_flow(&mut self, ctx: &GameContext, random: &mut RandomSource) -> Result<()> {
        while self.stage.is_game_flow() {
            self.apply_move(ctx, &Move::game_flow(random.next_seed()))?;
        }
        Ok(())
    }

    /// The result, once a game-end stage is reached.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.stage {
            Stage::PlayerWon => Some(GameOutcome::Won(Side::Player)),
            Stage::OpponentWon => Some(GameOutcome::Won(Side::Opponent)),
            Stage::Draw => Some(GameOutcome::Draw),
            _ => None,
        }
    }

    /// Side to act, if any.
    #[must_use]
    pub fn current_side(&self) -> Option<Side> {
        self.stage.side()
    }

    /// Stable 64-bit hash of the whole board.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    // === Helpers used by stage handlers and effects ===

    pub fn damage_hero(&mut self, side: Side, amount: i32) {
        self.sides[side].stat.take_damage(amount);
    }

    pub fn heal_hero(&mut self, side: Side, amount: i32) {
        self.sides[side].stat.heal(amount);
    }

    /// Damage a minion. Out-of-range indices are ignored.
    pub fn damage_minion(&mut self, side: Side, index: usize, amount: i32) {
        if let Some(minion) = self.sides[side].minions.get_mut(index) {
            minion.take_damage(amount);
        }
    }

    /// Draw one random card. An empty deck deals increasing fatigue damage;
    /// a full hand burns the drawn card.
    pub fn draw_random_card(&mut self, side: Side, rules: &RulesConfig) {
        let state = &mut self.sides[side];
        match state.deck.remove_random(&mut self.random) {
            Some(card) => {
                if state.hand.len() < rules.max_hand_size {
                    state.hand.push_back(card);
                }
            }
            None => {
                state.stat.fatigue += 1;
                let damage = state.stat.fatigue;
                state.stat.take_damage(damage);
            }
        }
    }

    /// Remove dead minions and move to a game-end stage if a hero died.
    ///
    /// Returns `true` if the game ended.
    pub fn resolve_deaths(&mut self) -> bool {
        for side in Side::BOTH {
            self.sides[side].minions.retain(|m| m.is_alive());
        }

        let player_dead = self.sides[Side::Player].stat.is_dead();
        let opponent_dead = self.sides[Side::Opponent].stat.is_dead();
        let end = match (player_dead, opponent_dead) {
            (true, true) => Stage::Draw,
            (true, false) => Stage::won(Side::Opponent),
            (false, true) => Stage::won(Side::Player),
            (false, false) => return false,
        };
        self.stage = end;
        self.data = StageData::None;
        true
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Stage: {} (turn {})", self.stage, self.turn)?;
        writeln!(f, "Hash: {:016x}", self.fingerprint())?;
        for (side, state) in self.sides.iter() {
            let stat = &state.stat;
            writeln!(
                f,
                "{side}: hp {}/{} armor {} crystal {}/{} fatigue {} deck {}",
                stat.hp,
                stat.max_hp,
                stat.armor,
                stat.crystal.current,
                stat.crystal.total,
                stat.fatigue,
                state.deck.len()
            )?;
            let hand: Vec<_> = state
                .hand
                .iter()
                .map(|c| format!("{}[{}]", c.card_id.raw(), c.cost))
                .collect();
            writeln!(f, "  hand: {}", hand.join(" "))?;
            let row: Vec<_> = state
                .minions
                .iter()
                .map(|m| format!("{}:{}/{}", m.card_id.raw(), m.attack, m.hp))
                .collect();
            writeln!(f, "  minions: {}", row.join(" "))?;
            if !state.secrets.is_empty() {
                writeln!(f, "  secrets: {}", state.secrets.len())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardType};

    fn card(id: u32, cost: i32) -> Card {
        Card {
            card_id: CardId::new(id),
            cost,
            card_type: CardType::Minion,
        }
    }

    fn minion(id: u32, attack: i32, hp: i32) -> Minion {
        Minion::from_definition(&CardDefinition::minion(CardId::new(id), "m", 1, attack, hp))
    }

    #[test]
    fn test_new_board() {
        let board = Board::new(&RulesConfig::default().with_starting_hp(20), 1);

        assert_eq!(board.stage, Stage::PlayerTurnStart);
        assert_eq!(board.data, StageData::None);
        assert_eq!(board.side(Side::Player).stat.hp, 20);
        assert!(board.outcome().is_none());
        assert_eq!(board.current_side(), Some(Side::Player));
    }

    #[test]
    fn test_armor_absorbs_damage() {
        let mut stat = HeroStat::new(30);
        stat.armor = 3;

        stat.take_damage(5);
        assert_eq!((stat.hp, stat.armor), (28, 0));

        stat.heal(10);
        assert_eq!(stat.hp, 30);
    }

    #[test]
    fn test_deck_order_insensitive() {
        let a: Deck = [card(3, 1), card(1, 1), card(2, 1)].into_iter().collect();
        let b: Deck = [card(2, 1), card(3, 1), card(1, 1)].into_iter().collect();
        assert_eq!(a, b);

        let ids: Vec<_> = a.iter().map(|c| c.card_id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_secrets_order_insensitive() {
        let mut a = Board::new(&RulesConfig::default(), 1);
        let mut b = a.clone();

        a.side_mut(Side::Player).secrets.insert(CardId::new(4));
        a.side_mut(Side::Player).secrets.insert(CardId::new(9));
        b.side_mut(Side::Player).secrets.insert(CardId::new(9));
        b.side_mut(Side::Player).secrets.insert(CardId::new(4));

        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_inequality_on_hand_order() {
        let mut a = Board::new(&RulesConfig::default(), 1);
        let mut b = a.clone();

        a.side_mut(Side::Player).hand.push_back(card(1, 1));
        a.side_mut(Side::Player).hand.push_back(card(2, 1));
        b.side_mut(Side::Player).hand.push_back(card(2, 1));
        b.side_mut(Side::Player).hand.push_back(card(1, 1));

        assert_ne!(a, b);
    }

    #[test]
    fn test_inequality_on_random_position() {
        let a = Board::new(&RulesConfig::default(), 1);
        let mut b = a.clone();
        b.random.next_seed();
        assert_ne!(a, b);
    }

    #[test]
    fn test_draw_random_card() {
        let rules = RulesConfig::default();
        let mut board = Board::new(&rules, 1);
        board.side_mut(Side::Player).deck = [card(1, 1), card(2, 2)].into_iter().collect();

        board.random.clear_flags();
        board.draw_random_card(Side::Player, &rules);

        assert!(board.random.was_used());
        assert_eq!(board.side(Side::Player).hand.len(), 1);
        assert_eq!(board.side(Side::Player).deck.len(), 1);
    }

    #[test]
    fn test_fatigue_increases() {
        let rules = RulesConfig::default();
        let mut board = Board::new(&rules, 1);

        board.draw_random_card(Side::Opponent, &rules);
        board.draw_random_card(Side::Opponent, &rules);

        let stat = board.side(Side::Opponent).stat;
        assert_eq!(stat.fatigue, 2);
        assert_eq!(stat.hp, 30 - 1 - 2);
    }

    #[test]
    fn test_full_hand_burns_card() {
        let rules = RulesConfig::default().with_max_hand_size(1);
        let mut board = Board::new(&rules, 1);
        board.side_mut(Side::Player).hand.push_back(card(9, 1));
        board.side_mut(Side::Player).deck = [card(1, 1)].into_iter().collect();

        board.draw_random_card(Side::Player, &rules);

        assert_eq!(board.side(Side::Player).hand.len(), 1);
        assert!(board.side(Side::Player).deck.is_empty());
    }

    #[test]
    fn test_resolve_deaths_removes_minions() {
        let mut board = Board::new(&RulesConfig::default(), 1);
        board.side_mut(Side::Player).minions.push(minion(1, 1, 1));
        board.side_mut(Side::Player).minions.push(minion(2, 1, 3));

        board.damage_minion(Side::Player, 0, 2);
        assert!(!board.resolve_deaths());

        let row = &board.side(Side::Player).minions;
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].card_id, CardId::new(2));
    }

    #[test]
    fn test_resolve_deaths_ends_game() {
        let mut board = Board::new(&RulesConfig::default(), 1);
        board.stage = Stage::PlayerAttack;

        board.damage_hero(Side::Opponent, 30);
        assert!(board.resolve_deaths());
        assert_eq!(board.stage, Stage::PlayerWon);
        assert_eq!(board.outcome(), Some(GameOutcome::Won(Side::Player)));
    }

    #[test]
    fn test_both_heroes_dead_is_draw() {
        let mut board = Board::new(&RulesConfig::default(), 1);
        board.damage_hero(Side::Player, 40);
        board.damage_hero(Side::Opponent, 40);

        assert!(board.resolve_deaths());
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_taunt_hidden_by_stealth() {
        let mut state = SideState::new(30);
        let mut guard = minion(1, 1, 1);
        guard.mechanics.taunt = true;
        guard.mechanics.stealth = true;
        state.minions.push(guard);
        assert!(!state.has_taunt());

        state.minions[0].mechanics.stealth = false;
        assert!(state.has_taunt());
    }

    #[test]
    fn test_display_mentions_stage() {
        let board = Board::new(&RulesConfig::default(), 1);
        let text = board.to_string();
        assert!(text.contains("PlayerTurnStart"));
        assert!(text.contains("Opponent: hp 30/30"));
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::new(&RulesConfig::default(), 5);
        board.side_mut(Side::Player).hand.push_back(card(1, 2));
        board.side_mut(Side::Opponent).minions.push(minion(3, 2, 2));
        board.random.next_seed();

        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(board, deserialized);
    }
}
