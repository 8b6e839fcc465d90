//! Attack: resolve combat between a staged attacker and defender.

use crate::core::{AttackTarget, Board, Side, Stage, StageData};
use crate::error::{GameError, Result};
use crate::rules::GameContext;

pub(crate) fn apply(_ctx: &GameContext, board: &mut Board, side: Side) -> Result<()> {
    let StageData::Attack { attacker, defender } = board.data else {
        return Err(GameError::MissingStageData {
            stage: board.stage,
            found: format!("{:?}", board.data),
        });
    };
    let attacker = usize::from(attacker);
    let enemy = side.other();

    let Some(attack) = board.side(side).minions.get(attacker).map(|m| m.attack) else {
        return Err(GameError::MissingStageData {
            stage: board.stage,
            found: format!("attacker index {attacker}"),
        });
    };

    match defender {
        AttackTarget::Hero => board.damage_hero(enemy, attack),
        AttackTarget::Minion(index) => {
            let index = usize::from(index);
            let Some(counter) = board.side(enemy).minions.get(index).map(|m| m.attack) else {
                return Err(GameError::MissingStageData {
                    stage: board.stage,
                    found: format!("defender index {index}"),
                });
            };
            board.damage_minion(enemy, index, attack);
            board.damage_minion(side, attacker, counter);
        }
    }

    if let Some(minion) = board.side_mut(side).minions.get_mut(attacker) {
        minion.attacked = true;
        minion.mechanics.stealth = false;
    }
    board.data = StageData::None;

    if !board.resolve_deaths() {
        board.stage = Stage::choose_board_move(side);
    }
    Ok(())
}
