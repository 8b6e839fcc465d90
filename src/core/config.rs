//! Rules configuration.
//!
//! Numeric limits of the card game. Boards never store a copy; every
//! stage handler reads them from the shared `GameContext`.

use serde::{Deserialize, Serialize};

/// Largest hand or row size a move can index. Hand, row and attacker
/// indices travel in `u8` operands, so the builders clamp to this.
pub const MAX_INDEXED_SLOTS: usize = u8::MAX as usize;

/// Game rule limits.
///
/// ## Example
///
/// ```
/// use ccg_search::core::RulesConfig;
///
/// let rules = RulesConfig::default()
///     .with_max_turns(20)
///     .with_choose_minion_location(true);
///
/// assert_eq!(rules.max_minions, 7);
/// assert_eq!(rules.max_turns, 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Minion row capacity per side, at most `MAX_INDEXED_SLOTS`.
    pub max_minions: usize,

    /// Hand capacity, at most `MAX_INDEXED_SLOTS`. Cards drawn into a
    /// full hand are burned.
    pub max_hand_size: usize,

    /// Crystal cap.
    pub max_crystal: i32,

    /// Starting (and maximum) hero hp.
    pub starting_hp: i32,

    /// Enumerate one minion play per legal slot. When off, plays carry
    /// location 0 and always append to the right end of the row.
    pub choose_minion_location: bool,

    /// Completed turns after which the game is a draw.
    pub max_turns: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_minions: 7,
            max_hand_size: 10,
            max_crystal: 10,
            starting_hp: 30,
            choose_minion_location: false,
            max_turns: 60,
        }
    }
}

impl RulesConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_minions(mut self, n: usize) -> Self {
        self.max_minions = n.min(MAX_INDEXED_SLOTS);
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, n: usize) -> Self {
        self.max_hand_size = n.min(MAX_INDEXED_SLOTS);
        self
    }

    #[must_use]
    pub fn with_max_crystal(mut self, n: i32) -> Self {
        self.max_crystal = n;
        self
    }

    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    #[must_use]
    pub fn with_choose_minion_location(mut self, enabled: bool) -> Self {
        self.choose_minion_location = enabled;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RulesConfig::default();
        assert_eq!(rules.max_minions, 7);
        assert_eq!(rules.max_hand_size, 10);
        assert_eq!(rules.max_crystal, 10);
        assert_eq!(rules.starting_hp, 30);
        assert!(!rules.choose_minion_location);
        assert_eq!(rules.max_turns, 60);
    }

    #[test]
    fn test_builder() {
        let rules = RulesConfig::new().with_max_minions(3).with_starting_hp(5);
        assert_eq!(rules.max_minions, 3);
        assert_eq!(rules.starting_hp, 5);
    }

    #[test]
    fn test_limits_clamped_to_index_width() {
        let rules = RulesConfig::new().with_max_hand_size(300).with_max_minions(1000);
        assert_eq!(rules.max_hand_size, MAX_INDEXED_SLOTS);
        assert_eq!(rules.max_minions, MAX_INDEXED_SLOTS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: RulesConfig = serde_json::from_str(r#"{"max_turns": 4}"#).unwrap();
        assert_eq!(rules.max_turns, 4);
        assert_eq!(rules.max_minions, 7);
    }
}
