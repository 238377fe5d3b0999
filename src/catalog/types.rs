use serde::{Deserialize, Serialize};

// === Enums ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Mystic,
    Ultimate,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Mystic,
            Rarity::Ultimate,
        ]
    }

    /// Position in the quality ordering, Common = 0.
    pub fn tier_index(self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Mystic => 3,
            Rarity::Ultimate => 4,
        }
    }

    pub fn parse(s: &str) -> Option<Rarity> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            "mystic" => Some(Rarity::Mystic),
            "ultimate" => Some(Rarity::Ultimate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to every scaled purchase price and to harvest income.
    pub fn cost_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }

    /// Multiplier applied to crop growth per tick.
    pub fn speed_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.25,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetBonusKind {
    Defense,
    GrowthSpeed,
    MoneyMultiplier,
}

// === Definitions ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedDefinition {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub base_price: u64,
    pub sell_price: u64,
    pub grow_time_secs: u32,
    pub req_level: u32,
    pub color: String,
}

/// A hoe in the upgrade chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Higher is faster. Snapshotted onto a plot when it is tilled.
    pub growth_multiplier: f64,
    pub price: u64,
    /// Money spent every time the hoe tills a plot.
    pub action_cost: u64,
    pub can_double_seed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub rarity: Rarity,
    pub bonus_kind: PetBonusKind,
    pub bonus_value: f64,
}

/// Summed bonuses of every owned pet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PetBonuses {
    pub defense: f64,
    pub growth_speed: f64,
    pub money_multiplier: f64,
}

impl PetBonuses {
    pub fn from_pets<'a>(pets: impl IntoIterator<Item = &'a PetDefinition>) -> Self {
        let mut bonuses = PetBonuses::default();
        for pet in pets {
            match pet.bonus_kind {
                PetBonusKind::Defense => bonuses.defense += pet.bonus_value,
                PetBonusKind::GrowthSpeed => bonuses.growth_speed += pet.bonus_value,
                PetBonusKind::MoneyMultiplier => bonuses.money_multiplier += pet.bonus_value,
            }
        }
        bonuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(kind: PetBonusKind, value: f64) -> PetDefinition {
        PetDefinition {
            id: "p".to_string(),
            name: "P".to_string(),
            description: String::new(),
            price: 0,
            rarity: Rarity::Common,
            bonus_kind: kind,
            bonus_value: value,
        }
    }

    #[test]
    fn rarity_ordering_matches_tier_index() {
        let all = Rarity::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].tier_index() + 1, pair[1].tier_index());
        }
    }

    #[test]
    fn difficulty_multipliers() {
        assert_eq!(Difficulty::Easy.cost_multiplier(), 0.75);
        assert_eq!(Difficulty::Normal.cost_multiplier(), 1.0);
        assert_eq!(Difficulty::Hard.cost_multiplier(), 1.5);
        assert_eq!(Difficulty::Easy.speed_multiplier(), 1.25);
        assert_eq!(Difficulty::Hard.speed_multiplier(), 0.8);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Rarity::parse("Mystic"), Some(Rarity::Mystic));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }

    #[test]
    fn pet_bonuses_sum_per_kind() {
        let pets = [
            pet(PetBonusKind::MoneyMultiplier, 0.1),
            pet(PetBonusKind::MoneyMultiplier, 1.0),
            pet(PetBonusKind::Defense, 10.0),
            pet(PetBonusKind::GrowthSpeed, 0.2),
        ];
        let bonuses = PetBonuses::from_pets(&pets);
        assert!((bonuses.money_multiplier - 1.1).abs() < 1e-9);
        assert!((bonuses.defense - 10.0).abs() < 1e-9);
        assert!((bonuses.growth_speed - 0.2).abs() < 1e-9);
    }
}
