//! Put minion: carry out a staged minion play.

use crate::cards::Minion;
use crate::core::{Board, Side, Stage, StageData};
use crate::effects::EffectContext;
use crate::error::{GameError, Result};
use crate::rules::GameContext;

pub(crate) fn apply(ctx: &GameContext, board: &mut Board, side: Side) -> Result<()> {
    let StageData::PutMinion {
        hand_index,
        location,
    } = board.data
    else {
        return Err(GameError::MissingStageData {
            stage: board.stage,
            found: format!("{:?}", board.data),
        });
    };

    let own = board.side(side);
    let hand_index = usize::from(hand_index);
    let card = match own.hand.get(hand_index) {
        Some(card) => *card,
        None => {
            return Err(GameError::MissingStageData {
                stage: board.stage,
                found: format!("hand index {hand_index} of {}", own.hand.len()),
            })
        }
    };
    let definition = ctx
        .card(card.card_id)
        .ok_or(GameError::UnknownCard(card.card_id))?;
    if own.minions.len() >= ctx.rules.max_minions {
        return Err(GameError::InvalidMove {
            stage: board.stage,
            mv: format!("put minion into a full row of {}", own.minions.len()),
        });
    }

    let mut minion = Minion::from_definition(definition);
    minion.summoned_this_turn = true;
    let location = if ctx.rules.choose_minion_location {
        usize::from(location).min(own.minions.len())
    } else {
        own.minions.len()
    };

    let own = board.side_mut(side);
    own.hand.remove(hand_index);
    own.stat.crystal.current -= card.cost;
    own.minions.insert(location, minion);
    board.data = StageData::None;

    if let Some(behavior) = ctx.behaviors.get(card.card_id) {
        let effect_ctx = EffectContext {
            side,
            source: card.card_id,
            minion_index: Some(location),
            rules: &ctx.rules,
        };
        behavior.on_summon(board, &effect_ctx)?;
    }

    if !board.resolve_deaths() {
        board.stage = Stage::choose_board_move(side);
    }
    Ok(())
}
