use std::collections::BTreeMap;

use rand::Rng;
use tracing::info;

use crate::catalog::pricing::{plot_unlock_cost, scaled_price, village_stat_cost};
use crate::catalog::{GENERATOR_MAX_LEVEL, GENERATOR_UPGRADE_COST, SHOVEL_PRICE};
use crate::farm::PlotStatus;
use crate::notify::NotificationKind;
use crate::player::StatKind;
use crate::simulation::generator;

use super::{GameSession, Rejection};

impl<R: Rng> GameSession<R> {
    /// Deduct `price` or reject with the shortfall.
    fn charge(&mut self, price: u64) -> Result<(), Rejection> {
        if self.state.player.spend(price) {
            Ok(())
        } else {
            self.reject(Rejection::InsufficientFunds {
                needed: price,
                available: self.state.player.money,
            })
        }
    }

    /// Buy one seed at the difficulty-scaled price.
    pub fn buy_seed(&mut self, seed_id: &str) -> Result<u64, Rejection> {
        let Some(seed) = self.catalog.seed(seed_id) else {
            return self.reject(Rejection::UnknownItem(seed_id.to_string()));
        };
        let (name, req_level, base_price) = (seed.name.clone(), seed.req_level, seed.base_price);
        let level = self.state.player.level;
        if req_level > level {
            return self.reject(Rejection::LevelTooLow {
                required: req_level,
                current: level,
            });
        }
        let price = scaled_price(base_price, self.state.difficulty);
        self.charge(price)?;
        self.state.player.inventory.add(seed_id, 1);
        info!(seed = seed_id, price, "Bought seed");
        self.notify(format!("Bought {}", name), NotificationKind::Success);
        Ok(price)
    }

    /// Buy and equip a hoe. Only the tool directly after the equipped one can
    /// be bought; the old hoe is replaced.
    pub fn buy_tool(&mut self, tool_id: &str) -> Result<u64, Rejection> {
        let tools = self.catalog.tools();
        let Some(wanted) = tools.iter().position(|t| t.id == tool_id) else {
            return self.reject(Rejection::UnknownItem(tool_id.to_string()));
        };
        let current = tools
            .iter()
            .position(|t| t.id == self.state.player.equipped_tool_id)
            .unwrap_or(0);
        if wanted <= current {
            let name = tools[wanted].name.clone();
            return self.reject(Rejection::AlreadyOwned(name));
        }
        if wanted != current + 1 {
            let next = tools[current + 1].name.clone();
            return self.reject(Rejection::NotNextInChain { next });
        }

        let tool = &tools[wanted];
        let (id, name) = (tool.id.clone(), tool.name.clone());
        let price = scaled_price(tool.price, self.state.difficulty);
        self.charge(price)?;
        self.state.player.equipped_tool_id = id;
        info!(tool = tool_id, price, "Upgraded hoe");
        self.notify(format!("Upgraded to {}!", name), NotificationKind::Success);
        Ok(price)
    }

    /// Buy whichever hoe comes next in the chain.
    pub fn buy_next_tool(&mut self) -> Result<u64, Rejection> {
        match self.next_tool_id() {
            Some(id) => self.buy_tool(&id),
            None => self.reject(Rejection::MaxLevel("Hoe")),
        }
    }

    pub fn next_tool_id(&self) -> Option<String> {
        self.catalog
            .next_tool(&self.state.player.equipped_tool_id)
            .map(|t| t.id.clone())
    }

    pub fn buy_shovel(&mut self) -> Result<u64, Rejection> {
        if self.state.player.has_shovel {
            return self.reject(Rejection::AlreadyOwned("Shovel".to_string()));
        }
        let price = scaled_price(SHOVEL_PRICE, self.state.difficulty);
        self.charge(price)?;
        self.state.player.has_shovel = true;
        info!(price, "Bought shovel");
        self.notify("Shovel Acquired!", NotificationKind::Success);
        Ok(price)
    }

    pub fn buy_pet(&mut self, pet_id: &str) -> Result<u64, Rejection> {
        let Some(pet) = self.catalog.pet(pet_id) else {
            return self.reject(Rejection::UnknownItem(pet_id.to_string()));
        };
        let (name, base_price) = (pet.name.clone(), pet.price);
        if self.state.player.owned_pets.contains(pet_id) {
            return self.reject(Rejection::AlreadyOwned(name));
        }
        let price = scaled_price(base_price, self.state.difficulty);
        self.charge(price)?;
        self.state.player.owned_pets.insert(pet_id.to_string());
        info!(pet = pet_id, price, "Adopted pet");
        self.notify(format!("Adopted {}!", name), NotificationKind::Success);
        Ok(price)
    }

    /// Raise one village stat by 1. The price grows with the current value.
    pub fn upgrade_village_stat(&mut self, stat: StatKind) -> Result<u32, Rejection> {
        let current = self.state.player.village_stats.get(stat);
        let price = village_stat_cost(current, self.state.difficulty);
        self.charge(price)?;
        let value = self.state.player.village_stats.get_mut(stat);
        *value += 1;
        let value = *value;
        info!(?stat, value, price, "Village stat upgraded");
        self.notify(format!("{} Upgraded!", stat.label()), NotificationKind::Success);
        Ok(value)
    }

    /// Unlock the lowest-index locked plot. Returns its index.
    pub fn unlock_next_plot(&mut self) -> Result<u32, Rejection> {
        if self.state.farm.count(PlotStatus::Locked) == 0 {
            return self.reject(Rejection::FullyExpanded);
        }
        let price = plot_unlock_cost(self.state.player.unlocked_plots, self.state.difficulty);
        self.charge(price)?;
        let Some(index) = self.state.farm.unlock_next() else {
            return self.reject(Rejection::FullyExpanded);
        };
        self.state.player.unlocked_plots += 1;
        info!(plot = index, price, unlocked = self.state.player.unlocked_plots, "Plot unlocked");
        self.notify("New Land Cleared!", NotificationKind::Success);
        Ok(index)
    }

    /// Spend `amount` on random seeds. See [`generator::generate`].
    pub fn generate(&mut self, amount: u32) -> Result<BTreeMap<String, u32>, Rejection> {
        let max_input = self.config.generator_max_input;
        match generator::generate(&self.catalog, &mut self.state.player, amount, max_input, &mut self.rng) {
            Ok(drawn) => {
                info!(
                    amount,
                    distinct = drawn.len(),
                    charges = self.state.player.generator_charges,
                    "Generator used"
                );
                self.notify(format!("Generated {} seeds!", amount), NotificationKind::Success);
                Ok(drawn)
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    pub fn upgrade_generator(&mut self) -> Result<u32, Rejection> {
        if self.state.player.generator_level >= GENERATOR_MAX_LEVEL {
            return self.reject(Rejection::MaxLevel("Generator"));
        }
        self.charge(GENERATOR_UPGRADE_COST)?;
        self.state.player.generator_level += 1;
        info!(level = self.state.player.generator_level, "Generator upgraded");
        self.notify("Generator Upgraded!", NotificationKind::Success);
        Ok(self.state.player.generator_level)
    }
}
