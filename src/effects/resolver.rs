//! Effect resolution - executing effects on a board.
//!
//! The resolver never removes dead minions; callers run
//! `Board::resolve_deaths` once the whole batch is done, so minion indices
//! stay stable while a batch resolves.

use crate::cards::CardId;
use crate::core::{Board, RulesConfig, Side};
use crate::error::{GameError, Result};

use super::targeting::{Character, TargetSelector};
use super::Effect;

/// Context for resolving effects.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    /// Side whose card produced the effect.
    pub side: Side,
    /// Card producing the effect.
    pub source: CardId,
    /// Row index of the source minion, if it is on the battlefield.
    pub minion_index: Option<usize>,
    pub rules: &'a RulesConfig,
}

/// Resolves effects on a board.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve effects in order, stopping at the first error.
    pub fn resolve_all(board: &mut Board, effects: &[Effect], ctx: &EffectContext<'_>) -> Result<()> {
        for effect in effects {
            Self::resolve(board, effect, ctx)?;
        }
        Ok(())
    }

    /// Resolve a single effect.
    ///
    /// Random effects are rejected outside game-flow stages.
    pub fn resolve(board: &mut Board, effect: &Effect, ctx: &EffectContext<'_>) -> Result<()> {
        if effect.is_random() && !board.stage.is_game_flow() {
            return Err(GameError::RandomnessInDecisionStage { stage: board.stage });
        }

        match effect {
            Effect::DealDamage { target, amount } => {
                for character in TargetSelector::select(board, ctx.side, *target) {
                    match character {
                        Character::Hero(side) => board.damage_hero(side, *amount),
                        Character::Minion(side, index) => board.damage_minion(side, index, *amount),
                    }
                }
            }

            Effect::Heal { target, amount } => {
                for character in TargetSelector::select(board, ctx.side, *target) {
                    match character {
                        Character::Hero(side) => board.heal_hero(side, *amount),
                        Character::Minion(side, index) => {
                            if let Some(minion) = board.side_mut(side).minions.get_mut(index) {
                                minion.heal(*amount);
                            }
                        }
                    }
                }
            }

            Effect::GainArmor { amount } => {
                board.side_mut(ctx.side).stat.armor += (*amount).max(0);
            }

            Effect::DrawCards { count } => {
                for _ in 0..*count {
                    board.draw_random_card(ctx.side, ctx.rules);
                }
            }

            Effect::BuffSelf { attack, health } => {
                if let Some(index) = ctx.minion_index {
                    if let Some(minion) = board.side_mut(ctx.side).minions.get_mut(index) {
                        minion.buff(*attack, *health);
                    }
                }
            }

            Effect::AddSecret { card } => {
                board.side_mut(ctx.side).secrets.insert(*card);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardDefinition, CardType, Minion};
    use crate::core::Stage;
    use crate::effects::Target;

    fn setup() -> (Board, RulesConfig) {
        let rules = RulesConfig::default();
        let mut board = Board::new(&rules, 11);
        board.stage = Stage::PlayerPutMinion;
        for hp in [1, 4] {
            let def = CardDefinition::minion(CardId::new(1), "m", 1, 1, hp);
            board.side_mut(Side::Opponent).minions.push(Minion::from_definition(&def));
        }
        let own = CardDefinition::minion(CardId::new(2), "own", 1, 2, 2);
        board.side_mut(Side::Player).minions.push(Minion::from_definition(&own));
        (board, rules)
    }

    fn ctx(rules: &RulesConfig) -> EffectContext<'_> {
        EffectContext {
            side: Side::Player,
            source: CardId::new(2),
            minion_index: Some(0),
            rules,
        }
    }

    #[test]
    fn test_damage_all_enemy_minions() {
        let (mut board, rules) = setup();

        EffectResolver::resolve(&mut board, &Effect::damage(Target::AllEnemyMinions, 2), &ctx(&rules)).unwrap();

        let hps: Vec<_> = board.side(Side::Opponent).minions.iter().map(|m| m.hp).collect();
        assert_eq!(hps, vec![-1, 2]);

        board.resolve_deaths();
        assert_eq!(board.side(Side::Opponent).minions.len(), 1);
    }

    #[test]
    fn test_damage_and_heal_heroes() {
        let (mut board, rules) = setup();
        let effects = [
            Effect::damage(Target::EnemyHero, 5),
            Effect::damage(Target::OwnHero, 4),
            Effect::heal(Target::OwnHero, 2),
        ];

        EffectResolver::resolve_all(&mut board, &effects, &ctx(&rules)).unwrap();

        assert_eq!(board.side(Side::Opponent).stat.hp, 25);
        assert_eq!(board.side(Side::Player).stat.hp, 28);
    }

    #[test]
    fn test_armor_buff_and_secret() {
        let (mut board, rules) = setup();
        let effects = [
            Effect::GainArmor { amount: 3 },
            Effect::BuffSelf { attack: 1, health: 1 },
            Effect::AddSecret { card: CardId::new(9) },
        ];

        EffectResolver::resolve_all(&mut board, &effects, &ctx(&rules)).unwrap();

        let own = board.side(Side::Player);
        assert_eq!(own.stat.armor, 3);
        assert_eq!((own.minions[0].attack, own.minions[0].hp), (3, 3));
        assert!(own.secrets.contains(&CardId::new(9)));
    }

    #[test]
    fn test_draw_cards() {
        let (mut board, rules) = setup();
        board.side_mut(Side::Player).deck = (0..3)
            .map(|i| Card {
                card_id: CardId::new(i + 1),
                cost: 1,
                card_type: CardType::Minion,
            })
            .collect();

        EffectResolver::resolve(&mut board, &Effect::DrawCards { count: 2 }, &ctx(&rules)).unwrap();

        assert_eq!(board.side(Side::Player).hand.len(), 2);
        assert_eq!(board.side(Side::Player).deck.len(), 1);
    }

    #[test]
    fn test_random_effect_rejected_in_decision_stage() {
        let (mut board, rules) = setup();
        board.stage = Stage::PlayerChooseBoardMove;

        let err = EffectResolver::resolve(
            &mut board,
            &Effect::damage(Target::RandomEnemyCharacter, 1),
            &ctx(&rules),
        )
        .unwrap_err();

        assert_eq!(
            err,
            GameError::RandomnessInDecisionStage {
                stage: Stage::PlayerChooseBoardMove
            }
        );
    }
}
