//! Property-based tests for the stage state machine.
//!
//! - Every enumerated move of a reachable decision board applies
//!   deterministically
//! - Equal boards hash equally
//! - Re-applying a move to a copy reproduces the successor

mod common;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ccg_search::core::{Board, Move, RandomSource};
use ccg_search::games::BoardInitializer;
use ccg_search::rules::GameContext;
use proptest::prelude::*;

use common::{context, deck_initializer};

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Move picks for a random walk; each is taken modulo the legal move count.
fn arb_walk() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 0..40)
}

/// Walk from a dealt board, crossing game flow with `seed`.
/// Returns every decision board visited.
fn walk(ctx: &GameContext, seed: u64, picks: &[usize]) -> Vec<Board> {
    let mut board = deck_initializer(ctx).initialize_board(seed);
    let mut rng = RandomSource::new(seed);
    let mut visited = Vec::new();

    for pick in picks {
        board.advance_game_flow(ctx, &mut rng).unwrap();
        if board.outcome().is_some() {
            break;
        }
        visited.push(board.clone());

        let moves = board.enumerate_moves(ctx).unwrap();
        board.apply_move(ctx, &moves[pick % moves.len()]).unwrap();
    }
    visited
}

fn hash_of(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_enumerated_moves_are_deterministic(seed in arb_seed(), picks in arb_walk()) {
        let ctx = context();
        for board in walk(&ctx, seed, &picks) {
            let moves = board.enumerate_moves(&ctx).unwrap();
            prop_assert_eq!(moves.first(), Some(&Move::EndTurn));
            for mv in &moves {
                let mut next = board.clone();
                prop_assert_eq!(next.apply_move(&ctx, mv), Ok(true));
            }
        }
    }

    #[test]
    fn prop_equal_boards_hash_equal(seed in arb_seed(), picks in arb_walk()) {
        let ctx = context();
        for board in walk(&ctx, seed, &picks) {
            let copy = board.clone();
            prop_assert_eq!(&board, &board);
            prop_assert_eq!(&copy, &board);
            prop_assert_eq!(hash_of(&copy), hash_of(&board));
            prop_assert_eq!(copy.fingerprint(), board.fingerprint());
        }
    }

    #[test]
    fn prop_replay_reproduces_successor(
        seed in arb_seed(),
        picks in arb_walk(),
        flow_seed in any::<u64>(),
    ) {
        let ctx = context();
        for board in walk(&ctx, seed, &picks) {
            for mv in board.enumerate_moves(&ctx).unwrap() {
                let mut first = board.clone();
                let mut second = board.clone();
                first.apply_move(&ctx, &mv).unwrap();
                second.apply_move(&ctx, &mv).unwrap();
                prop_assert_eq!(&first, &second);

                // Game flow: same seed, same outcome.
                if first.stage.is_game_flow() {
                    first.apply_move(&ctx, &Move::game_flow(flow_seed)).unwrap();
                    second.apply_move(&ctx, &Move::game_flow(flow_seed)).unwrap();
                    prop_assert_eq!(&first, &second);
                }
            }
        }
    }

    #[test]
    fn prop_same_seed_same_deal(seed in arb_seed()) {
        let ctx = context();
        let init = deck_initializer(&ctx);
        prop_assert_eq!(init.initialize_board(seed), init.initialize_board(seed));
    }
}
