//! Effect definitions.
//!
//! Effects are atomic changes a card can make when it enters the
//! battlefield. They compose into a `Battlecry` and are executed by
//! `EffectResolver`.

use serde::{Deserialize, Serialize};

use super::targeting::Target;
use crate::cards::CardId;

/// An atomic game effect.
///
/// ## Character Effects
///
/// - `DealDamage`: Damage every selected character
/// - `Heal`: Restore hp on every selected character
///
/// ## Own-Side Effects
///
/// - `GainArmor`: Add armor to the acting hero
/// - `DrawCards`: Draw random cards (random)
/// - `BuffSelf`: Raise the source minion's attack and health
/// - `AddSecret`: Put a secret into play
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    DealDamage { target: Target, amount: i32 },

    Heal { target: Target, amount: i32 },

    GainArmor { amount: i32 },

    DrawCards { count: u32 },

    BuffSelf { attack: i32, health: i32 },

    AddSecret { card: CardId },
}

impl Effect {
    /// Create a damage effect.
    pub fn damage(target: Target, amount: i32) -> Self {
        Self::DealDamage { target, amount }
    }

    /// Create a heal effect.
    pub fn heal(target: Target, amount: i32) -> Self {
        Self::Heal { target, amount }
    }

    /// Whether resolving this effect draws from the random source.
    #[must_use]
    pub fn is_random(&self) -> bool {
        match self {
            Effect::DealDamage { target, .. } | Effect::Heal { target, .. } => target.is_random(),
            Effect::DrawCards { count } => *count > 0,
            Effect::GainArmor { .. } | Effect::BuffSelf { .. } | Effect::AddSecret { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomness_classification() {
        assert!(Effect::damage(Target::RandomEnemyMinion, 1).is_random());
        assert!(Effect::DrawCards { count: 2 }.is_random());
        assert!(!Effect::DrawCards { count: 0 }.is_random());
        assert!(!Effect::heal(Target::OwnHero, 2).is_random());
        assert!(!Effect::GainArmor { amount: 5 }.is_random());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::damage(Target::AllEnemyMinions, 2);
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}
