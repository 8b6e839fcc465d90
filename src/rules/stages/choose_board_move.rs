//! Choose board move: the only decision stage.
//!
//! Moves are enumerated in a fixed order: `EndTurn`, then minion plays by
//! hand index (and slot), then attacks by attacker and defender. Applying
//! a move only stages it; the following game-flow stage carries it out.

use crate::core::{AttackTarget, Board, Move, Side, Stage, StageData};
use crate::error::{GameError, Result};
use crate::rules::GameContext;

pub(crate) fn enumerate(ctx: &GameContext, board: &Board, side: Side) -> Vec<Move> {
    let own = board.side(side);
    let mut moves = vec![Move::EndTurn];

    // Indices past the `u8` operand width are never offered; a config that
    // bypassed the builders cannot alias two slots onto one move.
    let row_len = own.minions.len();
    if row_len < ctx.rules.max_minions {
        for (index, card) in own.hand.iter().enumerate() {
            let Ok(hand_index) = u8::try_from(index) else {
                break;
            };
            if !card.is_minion() || card.cost > own.stat.crystal.current {
                continue;
            }
            if ctx.rules.choose_minion_location {
                for location in (0..=row_len).map_while(|slot| u8::try_from(slot).ok()) {
                    moves.push(Move::PlayHandCardMinion {
                        hand_index,
                        location,
                    });
                }
            } else {
                moves.push(Move::PlayHandCardMinion {
                    hand_index,
                    location: 0,
                });
            }
        }
    }

    let defenders = legal_defenders(board, side);
    for (attacker, minion) in own.minions.iter().enumerate() {
        let Ok(attacker) = u8::try_from(attacker) else {
            break;
        };
        if !minion.can_attack() {
            continue;
        }
        for defender in &defenders {
            moves.push(Move::Attack {
                attacker,
                defender: *defender,
            });
        }
    }

    moves
}

/// Targets `side` may attack. Taunt minions shield the hero and the rest
/// of the row; stealthed minions are never targetable.
fn legal_defenders(board: &Board, side: Side) -> Vec<AttackTarget> {
    let enemy = board.side(side.other());
    let taunt = enemy.has_taunt();

    let mut defenders = Vec::with_capacity(enemy.minions.len() + 1);
    if !taunt {
        defenders.push(AttackTarget::Hero);
    }
    defenders.extend(
        enemy
            .minions
            .iter()
            .enumerate()
            .map_while(|(i, m)| u8::try_from(i).ok().map(|i| (i, m)))
            .filter(|(_, m)| m.is_targetable() && (!taunt || m.mechanics.taunt))
            .map(|(i, _)| AttackTarget::Minion(i)),
    );
    defenders
}

pub(crate) fn apply(ctx: &GameContext, board: &mut Board, side: Side, mv: &Move) -> Result<()> {
    if !enumerate(ctx, board, side).contains(mv) {
        return Err(invalid_move(board.stage, mv));
    }

    match *mv {
        Move::EndTurn => {
            board.data = StageData::None;
            board.stage = Stage::turn_end(side);
        }
        Move::PlayHandCardMinion {
            hand_index,
            location,
        } => {
            board.data = StageData::PutMinion {
                hand_index,
                location,
            };
            board.stage = Stage::put_minion(side);
        }
        Move::Attack { attacker, defender } => {
            board.data = StageData::Attack { attacker, defender };
            board.stage = Stage::attack(side);
        }
        Move::GameFlow { .. } => return Err(invalid_move(board.stage, mv)),
    }
    Ok(())
}

fn invalid_move(stage: Stage, mv: &Move) -> GameError {
    GameError::InvalidMove {
        stage,
        mv: mv.to_string(),
    }
}
