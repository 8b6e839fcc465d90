//! Stage dispatcher.
//!
//! Routes `enumerate_moves` and `apply_move` to the handler of the
//! board's current stage. Both functions match exhaustively over `Stage`,
//! so adding a stage without a handler does not compile.
//!
//! ## Determinism contract
//!
//! `apply_move` clears the random source's usage flag before running the
//! handler and reads it afterwards. A decision stage that consumed
//! randomness is an error; game-flow stages reseed from the move first, so
//! the same `Move::GameFlow` always produces the same successor.

use crate::core::{Board, Move, Side, Stage, StageType};
use crate::error::{GameError, Result};

use super::context::GameContext;
use super::stages::{attack, choose_board_move, put_minion, turn_end, turn_start};

/// Legal moves for the board's current stage, in enumeration order.
pub fn enumerate_moves(ctx: &GameContext, board: &Board) -> Result<Vec<Move>> {
    match board.stage {
        Stage::PlayerChooseBoardMove => Ok(choose_board_move::enumerate(ctx, board, Side::Player)),
        Stage::OpponentChooseBoardMove => {
            Ok(choose_board_move::enumerate(ctx, board, Side::Opponent))
        }
        stage @ (Stage::PlayerTurnStart
        | Stage::PlayerPutMinion
        | Stage::PlayerAttack
        | Stage::PlayerTurnEnd
        | Stage::OpponentTurnStart
        | Stage::OpponentPutMinion
        | Stage::OpponentAttack
        | Stage::OpponentTurnEnd) => Err(GameError::GameFlowStage { stage }),
        Stage::PlayerWon | Stage::OpponentWon | Stage::Draw => Ok(Vec::new()),
    }
}

/// Apply `mv` in place. Returns `true` if no randomness was consumed.
pub fn apply_move(ctx: &GameContext, board: &mut Board, mv: &Move) -> Result<bool> {
    let stage = board.stage;

    match stage.kind() {
        StageType::GameEnd => return Err(GameError::GameOver { stage }),
        StageType::GameFlow => match mv {
            Move::GameFlow { rand_seed } => board.random.reseed(*rand_seed),
            _ => {
                return Err(GameError::InvalidMove {
                    stage,
                    mv: mv.to_string(),
                })
            }
        },
        StageType::Player | StageType::Opponent => {}
    }

    board.random.clear_flags();
    run_handler(ctx, board, stage, mv)?;
    check_determinism(stage, board.random.was_used())
}

/// Returns whether a transition out of `stage` was deterministic.
///
/// The resolver already refuses random effects in decision stages, so
/// this only fires if a decision handler draws from the board's random
/// source directly.
fn check_determinism(stage: Stage, used_randomness: bool) -> Result<bool> {
    if stage.is_decision() && used_randomness {
        return Err(GameError::RandomnessInDecisionStage { stage });
    }
    Ok(!used_randomness)
}

fn run_handler(ctx: &GameContext, board: &mut Board, stage: Stage, mv: &Move) -> Result<()> {
    match stage {
        Stage::PlayerTurnStart => turn_start::apply(ctx, board, Side::Player),
        Stage::PlayerChooseBoardMove => choose_board_move::apply(ctx, board, Side::Player, mv),
        Stage::PlayerPutMinion => put_minion::apply(ctx, board, Side::Player),
        Stage::PlayerAttack => attack::apply(ctx, board, Side::Player),
        Stage::PlayerTurnEnd => turn_end::apply(ctx, board, Side::Player),
        Stage::OpponentTurnStart => turn_start::apply(ctx, board, Side::Opponent),
        Stage::OpponentChooseBoardMove => choose_board_move::apply(ctx, board, Side::Opponent, mv),
        Stage::OpponentPutMinion => put_minion::apply(ctx, board, Side::Opponent),
        Stage::OpponentAttack => attack::apply(ctx, board, Side::Opponent),
        Stage::OpponentTurnEnd => turn_end::apply(ctx, board, Side::Opponent),
        Stage::PlayerWon | Stage::OpponentWon | Stage::Draw => Err(GameError::GameOver { stage }),
    }
}

/// The side choosing a move on this board.
pub fn acting_side(board: &Board) -> Result<Side> {
    match board.stage.kind() {
        StageType::Player => Ok(Side::Player),
        StageType::Opponent => Ok(Side::Opponent),
        StageType::GameFlow | StageType::GameEnd => Err(GameError::NotDecisionStage {
            stage: board.stage,
        }),
    }
}
