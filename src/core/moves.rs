//! Moves: the decisions a side can take, plus the game-flow sentinel.
//!
//! Moves are plain values. They are enumerated by the stage dispatcher,
//! applied to a `Board`, and keyed into the search tree through
//! `Move::choice_key`.

use serde::{Deserialize, Serialize};

/// Defender of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The enemy hero.
    Hero,
    /// Enemy minion at this row index.
    Minion(u8),
}

/// A move.
///
/// ## Example
///
/// ```
/// use ccg_search::core::Move;
///
/// let play = Move::PlayHandCardMinion { hand_index: 0, location: 0 };
/// assert_ne!(play.choice_key(), Move::EndTurn.choice_key());
/// assert!(Move::game_flow(7).is_game_flow());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Crosses a game-flow stage. The seed fixes every random outcome.
    GameFlow { rand_seed: u64 },
    EndTurn,
    PlayHandCardMinion { hand_index: u8, location: u8 },
    Attack { attacker: u8, defender: AttackTarget },
}

const OPERAND_BITS: u32 = 9;
const KIND_SHIFT: u32 = 2 * OPERAND_BITS;
// One past any `u8` row index.
const HERO_SLOT: i32 = 1 << 8;

impl Move {
    /// Game-flow sentinel carrying `rand_seed`.
    #[must_use]
    pub const fn game_flow(rand_seed: u64) -> Self {
        Move::GameFlow { rand_seed }
    }

    #[must_use]
    pub const fn is_game_flow(&self) -> bool {
        matches!(self, Move::GameFlow { .. })
    }

    /// Sparse integer key identifying this move among its siblings.
    ///
    /// Kind lives in bits 18.., the two operands in bits 9..18 and 0..9.
    /// Game-flow moves never enter the tree and all share key `-1`.
    #[must_use]
    pub const fn choice_key(&self) -> i32 {
        match *self {
            Move::GameFlow { .. } => -1,
            Move::EndTurn => 1 << KIND_SHIFT,
            Move::PlayHandCardMinion {
                hand_index,
                location,
            } => (2 << KIND_SHIFT) | ((hand_index as i32) << OPERAND_BITS) | location as i32,
            Move::Attack { attacker, defender } => {
                let slot = match defender {
                    AttackTarget::Hero => HERO_SLOT,
                    AttackTarget::Minion(index) => index as i32,
                };
                (3 << KIND_SHIFT) | ((attacker as i32) << OPERAND_BITS) | slot
            }
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::GameFlow { rand_seed } => write!(f, "GameFlow(seed={rand_seed})"),
            Move::EndTurn => write!(f, "EndTurn"),
            Move::PlayHandCardMinion {
                hand_index,
                location,
            } => write!(f, "PlayMinion(hand={hand_index}, at={location})"),
            Move::Attack {
                attacker,
                defender: AttackTarget::Hero,
            } => write!(f, "Attack({attacker} -> hero)"),
            Move::Attack {
                attacker,
                defender: AttackTarget::Minion(index),
            } => write!(f, "Attack({attacker} -> minion {index})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_choice_keys_are_distinct() {
        let mut moves = vec![Move::EndTurn];
        for hand_index in 0..10 {
            for location in 0..8 {
                moves.push(Move::PlayHandCardMinion {
                    hand_index,
                    location,
                });
            }
        }
        for attacker in 0..7 {
            moves.push(Move::Attack {
                attacker,
                defender: AttackTarget::Hero,
            });
            for index in 0..7 {
                moves.push(Move::Attack {
                    attacker,
                    defender: AttackTarget::Minion(index),
                });
            }
        }

        let keys: HashSet<_> = moves.iter().map(Move::choice_key).collect();
        assert_eq!(keys.len(), moves.len());
        assert!(!keys.contains(&Move::game_flow(0).choice_key()));
    }

    #[test]
    fn test_last_row_index_distinct_from_hero() {
        let hero = Move::Attack {
            attacker: 0,
            defender: AttackTarget::Hero,
        };
        let last = Move::Attack {
            attacker: 0,
            defender: AttackTarget::Minion(u8::MAX),
        };
        let next_attacker = Move::Attack {
            attacker: 1,
            defender: AttackTarget::Minion(0),
        };
        assert_ne!(hero.choice_key(), last.choice_key());
        assert_ne!(hero.choice_key(), next_attacker.choice_key());
    }

    #[test]
    fn test_game_flow_keys_ignore_seed() {
        assert_eq!(Move::game_flow(1).choice_key(), Move::game_flow(2).choice_key());
        assert!(Move::game_flow(1).is_game_flow());
        assert!(!Move::EndTurn.is_game_flow());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::EndTurn.to_string(), "EndTurn");
        let attack = Move::Attack {
            attacker: 1,
            defender: AttackTarget::Minion(2),
        };
        assert_eq!(attack.to_string(), "Attack(1 -> minion 2)");
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::PlayHandCardMinion {
            hand_index: 3,
            location: 1,
        };
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, deserialized);
    }
}
