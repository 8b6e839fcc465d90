//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which edge to descend (UCB1)
//! - `SimulationPolicy`: How to run rollouts (uniform random, aggressive)

use crate::core::{Board, Move, RandomSource, Side, SideMap};
use crate::error::Result;
use crate::rules::GameContext;

use super::config::MCTSConfig;
use super::node::EdgeSnapshot;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which edge to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select an index into `edges`.
    ///
    /// `edges` is never empty. Values are from the perspective of the side
    /// choosing at this node.
    fn select(&self, parent_visits: u64, edges: &[EdgeSnapshot], config: &MCTSConfig) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high reward) with exploration (low visits).
/// Formula: Q(a) + c * sqrt(ln(N) / n(a))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, parent_visits: u64, edges: &[EdgeSnapshot], config: &MCTSConfig) -> usize {
        let ln_parent = (parent_visits.max(1) as f64).ln();

        edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let score = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    edge.mean()
                        + config.exploration_constant * (ln_parent / edge.visits as f64).sqrt()
                };
                (i, score)
            })
            // Earliest index wins ties.
            .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((i, score)),
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf.
pub trait SimulationPolicy: Send + Sync {
    /// Pick an index into `moves`, which is never empty.
    fn choose_move(&self, board: &Board, moves: &[Move], rng: &mut RandomSource) -> usize;

    /// Play `board` out, returning rewards per side.
    ///
    /// Stops at a game-end stage, or after `max_moves` decisions
    /// (0 = no limit) and scores the board with `heuristic_eval`.
    fn simulate(
        &self,
        ctx: &GameContext,
        board: &mut Board,
        rng: &mut RandomSource,
        max_moves: u32,
    ) -> Result<SideMap<f64>> {
        let mut played = 0;

        loop {
            board.advance_game_flow(ctx, rng)?;

            if let Some(outcome) = board.outcome() {
                return Ok(outcome.rewards());
            }

            if max_moves > 0 && played >= max_moves {
                return Ok(heuristic_eval(board));
            }

            let moves = board.enumerate_moves(ctx)?;
            if moves.is_empty() {
                return Ok(SideMap::with_value(0.5));
            }

            let idx = self.choose_move(board, &moves, rng).min(moves.len() - 1);
            board.apply_move(ctx, &moves[idx])?;

            played += 1;
        }
    }
}

/// Random simulation policy.
///
/// Plays uniformly random legal moves.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl SimulationPolicy for RandomSimulation {
    fn choose_move(&self, _board: &Board, moves: &[Move], rng: &mut RandomSource) -> usize {
        rng.gen_range_usize(0..moves.len())
    }
}

/// Plays random moves but only ends the turn when nothing else is legal.
///
/// Games finish in far fewer moves than with `RandomSimulation`.
#[derive(Clone, Debug, Default)]
pub struct AggressiveSimulation;

impl SimulationPolicy for AggressiveSimulation {
    fn choose_move(&self, _board: &Board, moves: &[Move], rng: &mut RandomSource) -> usize {
        let active: Vec<usize> = moves
            .iter()
            .enumerate()
            .filter(|(_, mv)| !matches!(mv, Move::EndTurn))
            .map(|(i, _)| i)
            .collect();

        match rng.choose(&active) {
            Some(&i) => i,
            None => 0,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Simple heuristic evaluation based on hero health.
///
/// Returns each side's share of the total remaining hp.
#[must_use]
pub fn heuristic_eval(board: &Board) -> SideMap<f64> {
    let hp = SideMap::new(|side: Side| f64::from(board.side(side).stat.hp.max(0)));

    let total = hp[Side::Player] + hp[Side::Opponent];
    if total <= 0.0 {
        return SideMap::with_value(0.5);
    }

    SideMap::new(|side| hp[side] / total)
}
