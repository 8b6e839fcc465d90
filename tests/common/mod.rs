//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ccg_search::cards::{Card, CardCatalog, CardId};
use ccg_search::core::{Board, Side, Stage};
use ccg_search::effects::{Battlecry, BehaviorRegistry, Effect, Target};
use ccg_search::games::DeckInitializer;
use ccg_search::rules::GameContext;

pub const CARDS_JSON: &str = r#"[
    { "type": "MINION", "id": "CS2_231", "cost": 0, "attack": 1, "health": 1, "rarity": "COMMON" },
    { "type": "MINION", "id": "CS2_172", "cost": 2, "attack": 3, "health": 2, "race": "BEAST", "rarity": "FREE" },
    { "type": "MINION", "id": "CS2_121", "cost": 2, "attack": 2, "health": 2, "mechanics": ["TAUNT"] },
    { "type": "MINION", "id": "CS2_124", "cost": 3, "attack": 3, "health": 1, "mechanics": ["CHARGE"] },
    { "type": "MINION", "id": "EX1_008", "cost": 1, "attack": 1, "health": 1, "mechanics": ["DIVINE_SHIELD"] },
    { "type": "MINION", "id": "CS2_189", "cost": 1, "attack": 1, "health": 1, "mechanics": ["BATTLECRY"] },
    { "type": "MINION", "id": "EX1_012", "cost": 2, "attack": 1, "health": 1, "mechanics": ["SPELLPOWER", "DEATHRATTLE"] },
    { "type": "SPELL", "id": "CS2_029", "cost": 4 },
    { "type": "HERO", "id": "HERO_01", "cost": 0 },
    { "type": "ENCHANTMENT", "id": "CS2_074e" }
]"#;

pub fn catalog() -> Arc<CardCatalog> {
    Arc::new(CardCatalog::from_json_str(CARDS_JSON).expect("fixture catalog parses"))
}

pub fn id(catalog: &CardCatalog, original_id: &str) -> CardId {
    catalog
        .lookup_by_original_id(original_id)
        .expect("fixture card exists")
}

/// Context with the fixture catalog; the elven archer pings a random
/// enemy character on summon.
pub fn context() -> Arc<GameContext> {
    let catalog = catalog();
    let mut behaviors = BehaviorRegistry::new();
    behaviors.register_by_original_id(
        &catalog,
        "CS2_189",
        Battlecry(vec![Effect::damage(Target::RandomEnemyCharacter, 1)]),
    );
    Arc::new(GameContext::with_catalog(catalog).with_behaviors(behaviors))
}

/// Two 20-card decks of every fixture minion, three-card opening hands.
pub fn deck_initializer(ctx: &GameContext) -> DeckInitializer {
    let minions: Vec<CardId> = ctx.catalog.minions().map(|def| def.id).collect();
    let deck: Vec<CardId> = minions.iter().copied().cycle().take(20).collect();

    DeckInitializer::new(Arc::clone(&ctx.catalog))
        .rules(ctx.rules.clone())
        .deck(Side::Player, deck.clone())
        .expect("fixture deck")
        .deck(Side::Opponent, deck)
        .expect("fixture deck")
        .opening_hand(Side::Player, 3)
        .opening_hand(Side::Opponent, 4)
}

/// Player to move with `crystals` mana and `hand` in hand; everything
/// else empty.
pub fn decision_board(ctx: &GameContext, hand: &[CardId], crystals: i32) -> Board {
    let mut board = Board::new(&ctx.rules, 1);
    board.stage = Stage::PlayerChooseBoardMove;

    let player = board.side_mut(Side::Player);
    player.stat.crystal.current = crystals;
    player.stat.crystal.total = crystals;
    for card in hand {
        let definition = ctx.card(*card).expect("fixture card exists");
        player.hand.push_back(Card::from_definition(definition));
    }
    board
}
