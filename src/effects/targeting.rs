//! Effect targeting.
//!
//! - `Target`: which characters an effect touches, relative to the acting side
//! - `Character`: a concrete hero or minion on the board
//! - `TargetSelector`: turns a `Target` into characters

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Board, Side};

/// Which characters an effect touches, relative to the side resolving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    OwnHero,
    EnemyHero,
    /// One random enemy minion, if any.
    RandomEnemyMinion,
    /// The enemy hero or one of its minions, uniformly.
    RandomEnemyCharacter,
    AllEnemyMinions,
}

impl Target {
    #[must_use]
    pub fn is_random(self) -> bool {
        matches!(self, Target::RandomEnemyMinion | Target::RandomEnemyCharacter)
    }
}

/// A hero or minion on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Character {
    Hero(Side),
    Minion(Side, usize),
}

/// Selected characters. Rows hold at most a handful of minions.
pub type Selection = SmallVec<[Character; 8]>;

/// Resolves targets against a board.
pub struct TargetSelector;

impl TargetSelector {
    /// Select the characters `target` refers to for `side`.
    ///
    /// Random targets draw from the board's random source.
    pub fn select(board: &mut Board, side: Side, target: Target) -> Selection {
        let enemy = side.other();
        let enemy_minions = board.side(enemy).minions.len();
        let mut selection = Selection::new();

        match target {
            Target::OwnHero => selection.push(Character::Hero(side)),
            Target::EnemyHero => selection.push(Character::Hero(enemy)),
            Target::AllEnemyMinions => {
                selection.extend((0..enemy_minions).map(|i| Character::Minion(enemy, i)));
            }
            Target::RandomEnemyMinion => {
                if enemy_minions > 0 {
                    let index = board.random.gen_range_usize(0..enemy_minions);
                    selection.push(Character::Minion(enemy, index));
                }
            }
            Target::RandomEnemyCharacter => {
                let pick = board.random.gen_range_usize(0..enemy_minions + 1);
                if pick == enemy_minions {
                    selection.push(Character::Hero(enemy));
                } else {
                    selection.push(Character::Minion(enemy, pick));
                }
            }
        }

        selection
    }
}
