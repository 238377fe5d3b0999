//! Difficulty-scaled prices for everything the player can buy.

use crate::catalog::types::{Difficulty, SeedDefinition};
use crate::catalog::{INITIAL_PLOTS, PLOT_COST_INCREMENT, VILLAGE_STAT_BASE_COST};

/// `floor(base * cost_multiplier)`.
pub fn scaled_price(base: u64, difficulty: Difficulty) -> u64 {
    (base as f64 * difficulty.cost_multiplier()).floor() as u64
}

/// Cost to raise a village stat from `current` to `current + 1`.
pub fn village_stat_cost(current: u32, difficulty: Difficulty) -> u64 {
    let base = (VILLAGE_STAT_BASE_COST as f64 * (1.0 + current as f64 * 0.1)).floor() as u64;
    scaled_price(base, difficulty)
}

/// Cost of the next plot given how many are already unlocked.
///
/// The first expansion beyond the initial allotment costs one increment, the
/// second two increments, and so on.
pub fn plot_unlock_cost(unlocked_plots: u32, difficulty: Difficulty) -> u64 {
    let expansion = unlocked_plots.saturating_sub(INITIAL_PLOTS) as u64 + 1;
    scaled_price(expansion * PLOT_COST_INCREMENT, difficulty)
}

/// Sell price as shown in a shop listing. Pet bonuses are not included here;
/// they only apply when a crop is actually harvested.
pub fn displayed_sell_price(seed: &SeedDefinition, difficulty: Difficulty) -> u64 {
    scaled_price(seed.sell_price, difficulty)
}

/// Currency earned by harvesting `seed_count` crops of `seed`.
pub fn harvest_reward(
    seed: &SeedDefinition,
    seed_count: u32,
    money_bonus: f64,
    difficulty: Difficulty,
) -> u64 {
    let base = (seed.sell_price * seed_count as u64) as f64;
    let with_pets = (base * (1.0 + money_bonus)).floor();
    (with_pets * difficulty.cost_multiplier()).floor() as u64
}

/// Experience earned by harvesting; never less than 1.
pub fn harvest_xp(seed: &SeedDefinition, seed_count: u32) -> u64 {
    let xp = (seed.sell_price as f64 / 5.0 * seed_count as f64).floor() as u64;
    xp.max(1)
}
