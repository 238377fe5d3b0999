pub mod generation;
pub mod pricing;
pub mod types;

use rand::Rng;

pub use types::{
    Difficulty, PetBonusKind, PetBonuses, PetDefinition, Rarity, SeedDefinition, ToolDefinition,
};

pub const SHOVEL_PRICE: u64 = 500;
pub const GENERATOR_UPGRADE_COST: u64 = 5000;
pub const GENERATOR_MAX_LEVEL: u32 = 2;

pub const INITIAL_PLOTS: u32 = 9;
pub const MAX_PLOTS: u32 = 36;
pub const PLOT_COST_INCREMENT: u64 = 500;

pub const VILLAGE_STAT_BASE_COST: u64 = 500;
pub const STARTING_VILLAGE_STAT: u32 = 5;

pub const STARTING_MONEY: i64 = 100;
pub const STARTING_XP_TO_NEXT: u64 = 100;
pub const STARTING_SEED_COUNT: u32 = 5;
pub const STARTING_GENERATOR_CHARGES: u32 = 1;

pub const VICTORY_REWARD_FLAWLESS: i64 = 1000;
pub const VICTORY_REWARD: i64 = 300;

/// Generator odds per rarity tier, in percent, ordered Common..Ultimate.
pub const GENERATOR_ODDS_LV1: [u32; 5] = [50, 20, 15, 10, 5];
pub const GENERATOR_ODDS_LV2: [u32; 5] = [30, 25, 20, 15, 10];

/// Immutable definitions for one session.
#[derive(Debug, Clone)]
pub struct Catalog {
    seeds: Vec<SeedDefinition>,
    tools: Vec<ToolDefinition>,
    pets: Vec<PetDefinition>,
}

impl Catalog {
    /// Build the catalog, drawing seed names from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Catalog {
            seeds: generation::generate_seeds(rng),
            tools: generation::tool_chain(),
            pets: generation::pet_roster(),
        }
    }

    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn pets(&self) -> &[PetDefinition] {
        &self.pets
    }

    pub fn seed(&self, id: &str) -> Option<&SeedDefinition> {
        self.seeds.iter().find(|s| s.id == id)
    }

    pub fn tool(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }

    pub fn pet(&self, id: &str) -> Option<&PetDefinition> {
        self.pets.iter().find(|p| p.id == id)
    }

    /// The starter hoe, used whenever an equipped id fails to resolve.
    pub fn starter_tool(&self) -> &ToolDefinition {
        &self.tools[0]
    }

    pub fn seeds_of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &SeedDefinition> + '_ {
        self.seeds.iter().filter(move |s| s.rarity == rarity)
    }

    /// The tool that follows `current_id` in the upgrade chain, if any.
    pub fn next_tool(&self, current_id: &str) -> Option<&ToolDefinition> {
        let index = self.tools.iter().position(|t| t.id == current_id)?;
        self.tools.get(index + 1)
    }

    /// Seeds listed in the shop at `level`: anything unlocking within two levels.
    pub fn shop_seeds(&self, level: u32) -> impl Iterator<Item = &SeedDefinition> + '_ {
        self.seeds.iter().filter(move |s| s.req_level <= level + 2)
    }

    /// Summed bonuses of the given pet ids. Unknown ids contribute nothing.
    pub fn pet_bonuses<'a>(&self, pet_ids: impl IntoIterator<Item = &'a String>) -> PetBonuses {
        PetBonuses::from_pets(pet_ids.into_iter().filter_map(|id| self.pet(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn catalog() -> Catalog {
        Catalog::generate(&mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn lookup_by_id() {
        let c = catalog();
        assert_eq!(c.seed("seed_1").map(|s| s.rarity), Some(Rarity::Common));
        assert_eq!(c.tool("hoe_3").map(|t| t.name.as_str()), Some("Steel Hoe"));
        assert_eq!(c.pet("pet_cat").map(|p| p.bonus_kind), Some(PetBonusKind::MoneyMultiplier));
        assert!(c.seed("seed_999").is_none());
    }

    #[test]
    fn next_tool_walks_the_chain() {
        let c = catalog();
        assert_eq!(c.next_tool("hoe_start").map(|t| t.id.as_str()), Some("hoe_1"));
        assert_eq!(c.next_tool("hoe_6").map(|t| t.id.as_str()), Some("hoe_ultimate"));
        assert!(c.next_tool("hoe_ultimate").is_none());
        assert!(c.next_tool("spade").is_none());
    }

    #[test]
    fn seeds_of_rarity_filters() {
        let c = catalog();
        assert_eq!(c.seeds_of_rarity(Rarity::Mystic).count(), 30);
        assert!(c.seeds_of_rarity(Rarity::Epic).all(|s| s.rarity == Rarity::Epic));
    }

    #[test]
    fn shop_lists_seeds_two_levels_ahead() {
        let c = catalog();
        assert!(c.shop_seeds(1).all(|s| s.req_level <= 3));
        assert!(c.shop_seeds(1).any(|s| s.req_level == 3));
        assert_eq!(c.shop_seeds(100).count(), c.seeds().len());
    }

    #[test]
    fn odds_tables_sum_to_100() {
        assert_eq!(GENERATOR_ODDS_LV1.iter().sum::<u32>(), 100);
        assert_eq!(GENERATOR_ODDS_LV2.iter().sum::<u32>(), 100);
    }

    #[test]
    fn unknown_pet_ids_ignored_in_bonuses() {
        let c = catalog();
        let ids = vec!["pet_fairy".to_string(), "pet_ghost".to_string()];
        let bonuses = c.pet_bonuses(&ids);
        assert!((bonuses.growth_speed - 0.2).abs() < 1e-9);
        assert_eq!(bonuses.money_multiplier, 0.0);
    }
}
