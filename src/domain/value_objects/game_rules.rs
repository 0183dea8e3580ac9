//! Progression constants
//!
//! The defaults are the game's canonical balance. Environment overrides exist
//! for playtesting; unparseable values fall back to the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRules {
    /// XP needed to gain a level
    pub xp_per_level: u32,
    /// Attribute points granted per level gained
    pub points_per_level: u32,
    /// Flat XP for a completed quest, before the lore bonus
    pub base_quest_reward: u32,
    /// Highest level whose lessons should carry example code
    pub example_code_max_level: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            points_per_level: 2,
            base_quest_reward: 20,
            example_code_max_level: 3,
        }
    }
}

impl GameRules {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            xp_per_level: env_or("CODEQUEST_XP_PER_LEVEL", defaults.xp_per_level).max(1),
            points_per_level: env_or("CODEQUEST_POINTS_PER_LEVEL", defaults.points_per_level),
            base_quest_reward: env_or("CODEQUEST_BASE_QUEST_REWARD", defaults.base_quest_reward),
            example_code_max_level: env_or(
                "CODEQUEST_EXAMPLE_CODE_MAX_LEVEL",
                defaults.example_code_max_level,
            ),
        }
    }

    /// XP awarded for a completed quest at the given lore
    pub fn quest_reward(&self, lore: u32) -> u32 {
        self.base_quest_reward + lore
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reward_adds_lore() {
        let rules = GameRules::default();
        assert_eq!(rules.quest_reward(10), 30);
        assert_eq!(rules.quest_reward(0), 20);
    }
}
