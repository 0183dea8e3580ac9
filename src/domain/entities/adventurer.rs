//! Adventurer entity - the player's character once class and path are chosen

use serde::Serialize;

use crate::domain::entities::CompletedQuest;
use crate::domain::value_objects::{ClassId, GameRules, PathId, Stats};

/// A character on a learning path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adventurer {
    pub class: ClassId,
    pub path: PathId,
    pub stats: Stats,
    /// Starts at 1
    pub level: u32,
    /// Always below the rules' `xp_per_level`
    pub xp: u32,
    /// Attribute points granted by level-ups and not yet allocated
    pub available_points: u32,
    pub quest_log: Vec<CompletedQuest>,
}

/// What happened when XP was added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpGain {
    /// XP grew but stayed below the threshold
    Accumulated,
    /// The threshold was reached; carries the new level
    LeveledUp { level: u32 },
}

impl Adventurer {
    pub fn new(class: ClassId, path: PathId, stats: Stats) -> Self {
        Self {
            class,
            path,
            stats,
            level: 1,
            xp: 0,
            available_points: 0,
            quest_log: Vec::new(),
        }
    }

    /// Add XP, levelling up once if the threshold is reached
    ///
    /// The remainder above the threshold carries into the new level.
    pub fn gain_xp(&mut self, amount: u32, rules: &GameRules) -> XpGain {
        let total = self.xp + amount;
        if total >= rules.xp_per_level {
            self.level += 1;
            self.xp = total % rules.xp_per_level;
            self.available_points += rules.points_per_level;
            XpGain::LeveledUp { level: self.level }
        } else {
            self.xp = total;
            XpGain::Accumulated
        }
    }

    /// Log a completed quest and award its XP
    pub fn complete_quest(&mut self, title: &str, rules: &GameRules) -> (u32, XpGain) {
        let reward = rules.quest_reward(self.stats.lore);
        self.quest_log.push(CompletedQuest::new(title, reward));
        (reward, self.gain_xp(reward, rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifetime_xp(adventurer: &Adventurer) -> u64 {
        adventurer.quest_log.iter().map(|q| u64::from(q.xp_awarded)).sum()
    }

    fn mage() -> Adventurer {
        Adventurer::new(ClassId::Mage, PathId::Python, Stats::new(15, 8, 7, 10))
    }

    #[test]
    fn test_xp_accumulates_below_threshold() {
        let rules = GameRules::default();
        let mut adventurer = mage();

        assert_eq!(adventurer.gain_xp(99, &rules), XpGain::Accumulated);
        assert_eq!(adventurer.xp, 99);
        assert_eq!(adventurer.level, 1);
    }

    #[test]
    fn test_reaching_threshold_exactly_levels_up() {
        let rules = GameRules::default();
        let mut adventurer = mage();

        assert_eq!(adventurer.gain_xp(100, &rules), XpGain::LeveledUp { level: 2 });
        assert_eq!(adventurer.xp, 0);
        assert_eq!(adventurer.available_points, 2);
    }

    #[test]
    fn test_points_accumulate_across_unallocated_level_ups() {
        let rules = GameRules::default();
        let mut adventurer = mage();

        for n in 1..=5 {
            adventurer.gain_xp(rules.xp_per_level, &rules);
            assert_eq!(adventurer.available_points, 2 * n);
        }
        assert_eq!(adventurer.level, 6);
    }

    #[test]
    fn test_xp_is_lifetime_xp_modulo_threshold() {
        let rules = GameRules::default();
        let mut adventurer = mage();
        let lores = [10, 10, 3, 40, 0, 17, 55, 2];

        for (i, lore) in lores.iter().enumerate() {
            adventurer.stats.lore = *lore;
            let before = adventurer.xp;
            let (reward, gain) = adventurer.complete_quest(&format!("Quest {}", i), &rules);

            assert_eq!(reward, 20 + lore);
            assert!(adventurer.xp < rules.xp_per_level);
            match gain {
                XpGain::LeveledUp { .. } => assert!(before + reward >= 100),
                XpGain::Accumulated => assert!(before + reward < 100),
            }
            assert_eq!(lifetime_xp(&adventurer) % 100, u64::from(adventurer.xp));
        }
        assert_eq!(adventurer.quest_log.len(), lores.len());
    }
}
