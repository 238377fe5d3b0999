pub mod inventory;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    INITIAL_PLOTS, STARTING_GENERATOR_CHARGES, STARTING_MONEY, STARTING_SEED_COUNT,
    STARTING_VILLAGE_STAT, STARTING_XP_TO_NEXT,
};
pub use inventory::Inventory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Defense,
    Strength,
    Skill,
}

impl StatKind {
    pub fn all() -> &'static [StatKind] {
        &[StatKind::Defense, StatKind::Strength, StatKind::Skill]
    }

    pub fn parse(s: &str) -> Option<StatKind> {
        match s.to_ascii_lowercase().as_str() {
            "defense" | "def" => Some(StatKind::Defense),
            "strength" | "str" => Some(StatKind::Strength),
            "skill" | "skl" => Some(StatKind::Skill),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Defense => "DEFENSE",
            StatKind::Strength => "STRENGTH",
            StatKind::Skill => "SKILL",
        }
    }
}

/// Three combat stats, shared by the village and the horde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VillageStats {
    pub defense: u32,
    pub strength: u32,
    pub skill: u32,
}

impl VillageStats {
    pub fn uniform(value: u32) -> Self {
        VillageStats {
            defense: value,
            strength: value,
            skill: value,
        }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Defense => self.defense,
            StatKind::Strength => self.strength,
            StatKind::Skill => self.skill,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Defense => &mut self.defense,
            StatKind::Strength => &mut self.strength,
            StatKind::Skill => &mut self.skill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Signed so that penalties can be represented without wrapping.
    pub money: i64,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    pub village_stats: VillageStats,
    pub equipped_tool_id: String,
    pub has_shovel: bool,
    pub inventory: Inventory,
    pub unlocked_plots: u32,
    pub owned_pets: BTreeSet<String>,
    pub generator_level: u32,
    pub generator_charges: u32,
    pub horde_win_streak: u32,
}

impl Player {
    /// A fresh player holding the starter hoe and a handful of `starter_seed`.
    pub fn new(starter_tool_id: &str, starter_seed_id: &str) -> Self {
        let mut inventory = Inventory::default();
        inventory.add(starter_seed_id, STARTING_SEED_COUNT);
        Player {
            money: STARTING_MONEY,
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            village_stats: VillageStats::uniform(STARTING_VILLAGE_STAT),
            equipped_tool_id: starter_tool_id.to_string(),
            has_shovel: false,
            inventory,
            unlocked_plots: INITIAL_PLOTS,
            owned_pets: BTreeSet::new(),
            generator_level: 1,
            generator_charges: STARTING_GENERATOR_CHARGES,
            horde_win_streak: 0,
        }
    }

    pub fn can_afford(&self, price: u64) -> bool {
        self.money >= 0 && self.money as u64 >= price
    }

    /// Deduct `price` if affordable. Returns false and leaves money untouched otherwise.
    pub fn spend(&mut self, price: u64) -> bool {
        if !self.can_afford(price) {
            return false;
        }
        self.money -= price as i64;
        true
    }

    pub fn earn(&mut self, amount: u64) {
        self.money += amount as i64;
    }

    /// Add experience and resolve every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn award_xp(&mut self, amount: u64) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp_to_next > 0 && self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            self.xp_to_next = (self.xp_to_next as f64 * 1.5).floor() as u64;
            gained += 1;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("hoe_start", "seed_1")
    }

    #[test]
    fn starting_state() {
        let p = player();
        assert_eq!(p.money, 100);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_to_next, 100);
        assert_eq!(p.village_stats, VillageStats::uniform(5));
        assert_eq!(p.inventory.count("seed_1"), 5);
        assert_eq!(p.unlocked_plots, 9);
        assert_eq!(p.generator_level, 1);
        assert_eq!(p.generator_charges, 1);
    }

    #[test]
    fn single_level_up_carries_remainder() {
        let mut p = player();
        assert_eq!(p.award_xp(130), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 30);
        assert_eq!(p.xp_to_next, 150);
    }

    #[test]
    fn multiple_level_ups_in_one_award() {
        let mut p = player();
        // 100 + 150 + 225 = 475
        assert_eq!(p.award_xp(480), 3);
        assert_eq!(p.level, 4);
        assert_eq!(p.xp, 5);
        assert_eq!(p.xp_to_next, 337);
    }

    #[test]
    fn below_threshold_no_level() {
        let mut p = player();
        assert_eq!(p.award_xp(99), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 99);
    }

    #[test]
    fn spend_rejects_without_change() {
        let mut p = player();
        assert!(!p.spend(101));
        assert_eq!(p.money, 100);
        assert!(p.spend(100));
        assert_eq!(p.money, 0);
    }

    #[test]
    fn negative_balance_cannot_afford_anything_but_free() {
        let mut p = player();
        p.money = -5;
        assert!(!p.can_afford(1));
        assert!(!p.can_afford(0));
    }

    #[test]
    fn stat_kind_parse_and_access() {
        let mut stats = VillageStats::uniform(5);
        *stats.get_mut(StatKind::parse("str").unwrap()) += 2;
        assert_eq!(stats.get(StatKind::Strength), 7);
        assert_eq!(stats.get(StatKind::Skill), 5);
    }
}
