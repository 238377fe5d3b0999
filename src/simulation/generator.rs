use std::collections::BTreeMap;

use rand::Rng;

use crate::catalog::{Catalog, Rarity, GENERATOR_ODDS_LV1, GENERATOR_ODDS_LV2};
use crate::player::Player;
use crate::session::Rejection;

/// Odds table in percent for a generator level. Level 2 and above share the
/// upgraded table.
pub fn odds_for_level(level: u32) -> &'static [u32; 5] {
    if level <= 1 { &GENERATOR_ODDS_LV1 } else { &GENERATOR_ODDS_LV2 }
}

/// Map a roll in `[0, 100)` onto a rarity through the cumulative table.
pub fn rarity_for_roll(roll: f64, odds: &[u32; 5]) -> Rarity {
    let mut cumulative = 0.0;
    for (rarity, pct) in Rarity::all().iter().zip(odds.iter()) {
        cumulative += *pct as f64;
        if roll < cumulative {
            return *rarity;
        }
    }
    Rarity::Ultimate
}

/// Draw `amount` seeds, one per currency unit, aggregated by seed id.
pub fn draw_seeds<R: Rng + ?Sized>(
    catalog: &Catalog,
    level: u32,
    amount: u32,
    rng: &mut R,
) -> BTreeMap<String, u32> {
    let odds = odds_for_level(level);
    let mut drawn = BTreeMap::new();
    for _ in 0..amount {
        let roll = rng.gen_range(0.0..100.0);
        let rarity = rarity_for_roll(roll, odds);
        let candidates: Vec<_> = catalog.seeds_of_rarity(rarity).collect();
        if candidates.is_empty() {
            continue;
        }
        let seed = candidates[rng.gen_range(0..candidates.len())];
        *drawn.entry(seed.id.clone()).or_insert(0) += 1;
    }
    drawn
}

/// Spend `amount` currency on `amount` draws.
///
/// Checked in order: input cap, remaining charges, then funds. Any failure
/// leaves the player untouched. Success costs one charge regardless of the
/// number of draws.
pub fn generate<R: Rng + ?Sized>(
    catalog: &Catalog,
    player: &mut Player,
    amount: u32,
    max_input: u32,
    rng: &mut R,
) -> Result<BTreeMap<String, u32>, Rejection> {
    if amount > max_input {
        return Err(Rejection::InputExceedsCap { cap: max_input });
    }
    if player.generator_charges == 0 {
        return Err(Rejection::NoCharges);
    }
    if amount == 0 {
        return Err(Rejection::InvalidAmount);
    }
    if !player.can_afford(amount as u64) {
        return Err(Rejection::InsufficientFunds {
            needed: amount as u64,
            available: player.money,
        });
    }

    let drawn = draw_seeds(catalog, player.generator_level, amount, rng);
    player.inventory.merge(&drawn);
    player.money -= amount as i64;
    player.generator_charges -= 1;
    Ok(drawn)
}
