//! Turn end: hand the turn to the other side, or stop at the turn limit.

use log::debug;

use crate::core::{Board, Side, Stage, StageData};
use crate::error::Result;
use crate::rules::GameContext;

pub(crate) fn apply(ctx: &GameContext, board: &mut Board, side: Side) -> Result<()> {
    board.data = StageData::None;
    board.turn += 1;

    if board.turn >= ctx.rules.max_turns {
        debug!("turn limit {} reached, game drawn", ctx.rules.max_turns);
        board.stage = Stage::Draw;
    } else {
        board.stage = Stage::turn_start(side.other());
    }
    Ok(())
}
