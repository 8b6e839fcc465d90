//! Turn start: crystals, readying, and the turn's card draw.

use crate::core::{Board, Side, Stage, StageData};
use crate::error::Result;
use crate::rules::GameContext;

pub(crate) fn apply(ctx: &GameContext, board: &mut Board, side: Side) -> Result<()> {
    let rules = &ctx.rules;
    let own = board.side_mut(side);

    let crystal = &mut own.stat.crystal;
    crystal.total = (crystal.total + 1).min(rules.max_crystal);
    crystal.current = crystal.total;

    for minion in own.minions.iter_mut() {
        minion.ready();
    }

    board.data = StageData::None;
    board.draw_random_card(side, rules);

    if !board.resolve_deaths() {
        board.stage = Stage::choose_board_move(side);
    }
    Ok(())
}
