use rand::prelude::*;

use crate::catalog::types::*;

const PREFIXES: [&str; 10] = [
    "Star", "Moon", "Sun", "Void", "Fire", "Ice", "Earth", "Wind", "Thunder", "Life",
];
const SUFFIXES: [&str; 10] = [
    "Root", "Berry", "Leaf", "Bloom", "Fruit", "Sprout", "Melon", "Nut", "Gourd", "Rose",
];

/// Per-tier shape of the seed curve.
struct TierConfig {
    rarity: Rarity,
    count: u32,
    time_mult: f64,
    price_mult: f64,
    color: &'static str,
}

const TIERS: [TierConfig; 5] = [
    TierConfig { rarity: Rarity::Common, count: 60, time_mult: 1.0, price_mult: 1.0, color: "#a3e635" },
    TierConfig { rarity: Rarity::Rare, count: 50, time_mult: 2.5, price_mult: 4.0, color: "#60a5fa" },
    TierConfig { rarity: Rarity::Epic, count: 40, time_mult: 5.0, price_mult: 10.0, color: "#c084fc" },
    TierConfig { rarity: Rarity::Mystic, count: 30, time_mult: 10.0, price_mult: 30.0, color: "#f472b6" },
    TierConfig { rarity: Rarity::Ultimate, count: 20, time_mult: 25.0, price_mult: 100.0, color: "#facc15" },
];

/// Generate the full seed catalog.
///
/// Prices and grow times follow a fixed curve per tier; only the display
/// names draw from `rng`. Ids run `seed_1..` in generation order, Common first.
pub fn generate_seeds<R: Rng + ?Sized>(rng: &mut R) -> Vec<SeedDefinition> {
    let mut seeds = Vec::with_capacity(TIERS.iter().map(|t| t.count as usize).sum());
    let mut next_id = 1u32;

    for tier in &TIERS {
        for i in 0..tier.count {
            let prefix = PREFIXES[rng.gen_range(0..PREFIXES.len())];
            let suffix = SUFFIXES[rng.gen_range(0..SUFFIXES.len())];
            let golden = if tier.rarity == Rarity::Ultimate { "Golden " } else { "" };
            let name = format!("{}{}{} {}", golden, prefix, suffix, i + 1);

            let tier_progress = i as f64 / tier.count as f64;
            let grow_time = 5.0 + tier.time_mult * 5.0 + tier_progress * 10.0;
            let price = (10.0 + tier.price_mult * 10.0 + tier_progress * 50.0).floor() as u64;
            let sell = (price as f64 * 1.8).floor() as u64;
            let req_level = tier.rarity.tier_index() * 5 + (tier_progress * 5.0).floor() as u32;

            seeds.push(SeedDefinition {
                id: format!("seed_{}", next_id),
                name,
                rarity: tier.rarity,
                base_price: price,
                sell_price: sell,
                grow_time_secs: grow_time.floor() as u32,
                req_level,
                color: tier.color.to_string(),
            });
            next_id += 1;
        }
    }

    seeds
}

fn hoe(
    id: &str,
    name: &str,
    rarity: Rarity,
    growth_multiplier: f64,
    price: u64,
    action_cost: u64,
) -> ToolDefinition {
    ToolDefinition {
        id: id.to_string(),
        name: name.to_string(),
        rarity,
        growth_multiplier,
        price,
        action_cost,
        can_double_seed: false,
    }
}

/// The hoe upgrade chain, starter first. Only the last entry can double seed.
pub fn tool_chain() -> Vec<ToolDefinition> {
    let mut tools = vec![
        hoe("hoe_start", "Rusty Hoe", Rarity::Common, 1.0, 0, 2),
        hoe("hoe_1", "Copper Hoe", Rarity::Common, 1.2, 1000, 5),
        hoe("hoe_2", "Iron Hoe", Rarity::Rare, 1.4, 2000, 10),
        hoe("hoe_3", "Steel Hoe", Rarity::Rare, 1.6, 3000, 15),
        hoe("hoe_4", "Silver Hoe", Rarity::Epic, 1.8, 5000, 25),
        hoe("hoe_5", "Gold Hoe", Rarity::Epic, 2.0, 8000, 50),
        hoe("hoe_6", "Diamond Hoe", Rarity::Mystic, 2.5, 10000, 100),
        hoe("hoe_ultimate", "Omni Hoe", Rarity::Ultimate, 3.0, 15000, 200),
    ];
    if let Some(last) = tools.last_mut() {
        last.can_double_seed = true;
    }
    tools
}

fn pet(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    rarity: Rarity,
    bonus_kind: PetBonusKind,
    bonus_value: f64,
) -> PetDefinition {
    PetDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        rarity,
        bonus_kind,
        bonus_value,
    }
}

pub fn pet_roster() -> Vec<PetDefinition> {
    vec![
        pet("pet_dog", "Guard Dog", "+10 Base Defense", 500, Rarity::Common, PetBonusKind::Defense, 10.0),
        pet("pet_cat", "Lucky Cat", "+10% Harvest Money", 1000, Rarity::Rare, PetBonusKind::MoneyMultiplier, 0.1),
        pet("pet_fairy", "Nature Fairy", "+20% Growth Speed", 1500, Rarity::Epic, PetBonusKind::GrowthSpeed, 0.2),
        pet("pet_golem", "Rock Golem", "+100 Base Defense", 2000, Rarity::Mystic, PetBonusKind::Defense, 100.0),
        pet("pet_dragon", "Sky Dragon", "x2 Harvest Money", 3000, Rarity::Ultimate, PetBonusKind::MoneyMultiplier, 1.0),
    ]
}
