use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::catalog::pricing::{harvest_reward, harvest_xp};
use crate::catalog::ToolDefinition;
use crate::farm::PlotStatus;
use crate::notify::NotificationKind;

use super::{GameSession, Rejection, ToolKind};

/// What clicking a plot did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlotAction {
    Cleared,
    Tilled { cost: u64 },
    Planted { seed_id: String, seed_count: u32 },
    Harvested { money: u64, xp: u64, levels_gained: u32 },
    ClearedWithered,
    Nothing,
}

impl<R: Rng> GameSession<R> {
    /// Apply the current selection to a plot.
    ///
    /// The first matching rule wins: shovel clears any worked plot, hoe tills
    /// empty soil, a selected seed plants on tilled soil, a ready crop is
    /// harvested, a withered crop is cleared. Anything else does nothing.
    pub fn interact(&mut self, index: u32) -> Result<PlotAction, Rejection> {
        let Some(status) = self.state.farm.get(index).map(|p| p.status) else {
            return self.reject(Rejection::UnknownPlot(index));
        };
        let tool = self.selection.tool;

        let action = if tool == ToolKind::Shovel
            && status != PlotStatus::Locked
            && status != PlotStatus::Empty
        {
            self.clear_plot(index);
            PlotAction::Cleared
        } else if tool == ToolKind::Hoe && status == PlotStatus::Empty {
            self.till(index)?
        } else if let (Some(seed_id), PlotStatus::Tilled) = (self.selection.seed_id.clone(), status) {
            self.plant(index, &seed_id)?
        } else if status == PlotStatus::Ready {
            self.harvest(index)
        } else if status == PlotStatus::Withered {
            self.clear_plot(index);
            PlotAction::ClearedWithered
        } else {
            PlotAction::Nothing
        };

        debug!(plot = index, ?tool, ?action, "Plot interaction");
        Ok(action)
    }

    fn equipped_tool(&self) -> &ToolDefinition {
        self.catalog
            .tool(&self.state.player.equipped_tool_id)
            .unwrap_or_else(|| self.catalog.starter_tool())
    }

    fn clear_plot(&mut self, index: u32) {
        if let Some(plot) = self.state.farm.get_mut(index) {
            plot.clear();
        }
    }

    fn till(&mut self, index: u32) -> Result<PlotAction, Rejection> {
        let tool = self.equipped_tool();
        let cost = tool.action_cost;
        let multiplier = tool.growth_multiplier;
        if !self.state.player.spend(cost) {
            return self.reject(Rejection::InsufficientFunds {
                needed: cost,
                available: self.state.player.money,
            });
        }
        if let Some(plot) = self.state.farm.get_mut(index) {
            plot.till(multiplier);
        }
        Ok(PlotAction::Tilled { cost })
    }

    fn plant(&mut self, index: u32, seed_id: &str) -> Result<PlotAction, Rejection> {
        let held = self.state.player.inventory.count(seed_id);
        if held == 0 {
            return self.reject(Rejection::InsufficientSeeds {
                seed_id: seed_id.to_string(),
            });
        }
        let seed_count = if self.equipped_tool().can_double_seed && held >= 2 { 2 } else { 1 };
        self.state.player.inventory.remove(seed_id, seed_count);
        if let Some(plot) = self.state.farm.get_mut(index) {
            plot.plant(seed_id, seed_count);
        }
        if seed_count == 2 {
            self.notify("Double Seed Planted!", NotificationKind::Info);
        }
        if self.state.player.inventory.count(seed_id) == 0 {
            self.selection.reset();
        }
        Ok(PlotAction::Planted {
            seed_id: seed_id.to_string(),
            seed_count,
        })
    }

    fn harvest(&mut self, index: u32) -> PlotAction {
        let (seed_id, seed_count) = match self.state.farm.get(index) {
            Some(plot) => (plot.seed_id.clone(), plot.seed_count),
            None => return PlotAction::Nothing,
        };
        let Some(seed) = seed_id.as_deref().and_then(|id| self.catalog.seed(id)) else {
            debug!(plot = index, ?seed_id, "Ready plot has unknown seed; not harvested");
            return PlotAction::Nothing;
        };
        let bonus = self.pet_bonuses().money_multiplier;
        let money = harvest_reward(seed, seed_count, bonus, self.state.difficulty);
        let xp = harvest_xp(seed, seed_count);

        self.clear_plot(index);
        self.state.player.earn(money);
        let levels_gained = self.state.player.award_xp(xp);
        self.notify(format!("+${}", money), NotificationKind::Earning);
        if levels_gained > 0 {
            let message = format!("Level Up! You are now level {}", self.state.player.level);
            self.notify(message, NotificationKind::Info);
        }
        PlotAction::Harvested {
            money,
            xp,
            levels_gained,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Difficulty;
    use crate::session::tests::session;

    fn make_ready(s: &mut GameSession, index: u32, seed_id: &str, seed_count: u32) {
        let plot = s.state.farm.get_mut(index).unwrap();
        plot.plant(seed_id, seed_count);
        plot.progress = 100.0;
        plot.status = PlotStatus::Ready;
    }

    #[test]
    fn hoe_tills_empty_plot_for_action_cost() {
        let mut s = session(Difficulty::Normal);
        let cost = s.equipped_tool().action_cost;
        let before = s.player().money;
        assert_eq!(s.interact(0), Ok(PlotAction::Tilled { cost }));
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Tilled);
        assert_eq!(s.player().money, before - cost as i64);
    }

    #[test]
    fn tilling_without_funds_changes_nothing() {
        let mut s = session(Difficulty::Normal);
        s.state.player.money = 0;
        let result = s.interact(0);
        assert!(matches!(result, Err(Rejection::InsufficientFunds { .. })));
        assert_eq!(s.player().money, 0);
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Empty);
    }

    #[test]
    fn hoe_on_locked_plot_is_noop() {
        let mut s = session(Difficulty::Normal);
        assert_eq!(s.interact(20), Ok(PlotAction::Nothing));
        assert_eq!(s.farm().get(20).unwrap().status, PlotStatus::Locked);
    }

    #[test]
    fn unknown_plot_rejected() {
        let mut s = session(Difficulty::Normal);
        assert_eq!(s.interact(99), Err(Rejection::UnknownPlot(99)));
    }

    #[test]
    fn tilling_snapshots_tool_multiplier() {
        let mut s = session(Difficulty::Normal);
        s.state.player.money = 10_000;
        s.state.player.equipped_tool_id = "hoe_3".to_string();
        let expected = s.catalog().tool("hoe_3").unwrap().growth_multiplier;
        s.interact(0).unwrap();
        s.state.player.equipped_tool_id = "hoe_start".to_string();
        assert_eq!(s.farm().get(0).unwrap().growth_multiplier, expected);
    }

    #[test]
    fn planting_consumes_one_seed() {
        let mut s = session(Difficulty::Normal);
        s.interact(0).unwrap();
        s.select_seed(Some("seed_1")).unwrap();
        let action = s.interact(0).unwrap();
        assert_eq!(
            action,
            PlotAction::Planted {
                seed_id: "seed_1".to_string(),
                seed_count: 1
            }
        );
        assert_eq!(s.player().inventory.count("seed_1"), 4);
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Growing);
        assert_eq!(s.selection().tool, ToolKind::Seed);
    }

    #[test]
    fn double_seed_leaves_remainder_and_keeps_selection() {
        let mut s = session(Difficulty::Normal);
        s.state.player.equipped_tool_id = "hoe_ultimate".to_string();
        s.state.player.inventory = Default::default();
        s.state.player.inventory.add("seed_7", 3);
        s.state.farm.get_mut(0).unwrap().till(1.0);
        s.select_seed(Some("seed_7")).unwrap();

        let action = s.interact(0).unwrap();
        assert_eq!(
            action,
            PlotAction::Planted {
                seed_id: "seed_7".to_string(),
                seed_count: 2
            }
        );
        assert_eq!(s.player().inventory.count("seed_7"), 1);
        assert_eq!(s.selection().seed_id.as_deref(), Some("seed_7"));
        assert!(s.notifications().iter().any(|n| n.message == "Double Seed Planted!"));
    }

    #[test]
    fn last_seed_resets_selection() {
        let mut s = session(Difficulty::Normal);
        s.state.player.inventory = Default::default();
        s.state.player.inventory.add("seed_2", 1);
        s.state.farm.get_mut(0).unwrap().till(1.0);
        s.select_seed(Some("seed_2")).unwrap();
        s.interact(0).unwrap();
        assert_eq!(s.selection(), &crate::session::Selection::default());
        assert_eq!(s.player().inventory.count("seed_2"), 0);
    }

    #[test]
    fn planting_without_seeds_rejected() {
        let mut s = session(Difficulty::Normal);
        s.state.farm.get_mut(0).unwrap().till(1.0);
        s.select_seed(Some("seed_9")).unwrap();
        assert_eq!(
            s.interact(0),
            Err(Rejection::InsufficientSeeds {
                seed_id: "seed_9".to_string()
            })
        );
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Tilled);
    }

    #[test]
    fn harvest_pays_and_clears() {
        let mut s = session(Difficulty::Normal);
        make_ready(&mut s, 0, "seed_1", 1);
        let seed = s.catalog().seed("seed_1").unwrap().clone();
        let before = s.player().money;
        let action = s.interact(0).unwrap();
        let expected = harvest_reward(&seed, 1, 0.0, Difficulty::Normal);
        assert!(matches!(action, PlotAction::Harvested { money, .. } if money == expected));
        assert_eq!(s.player().money, before + expected as i64);
        let plot = s.farm().get(0).unwrap();
        assert_eq!(plot.status, PlotStatus::Empty);
        assert_eq!(plot.seed_id, None);
        assert_eq!(plot.seed_count, 1);
    }

    #[test]
    fn double_harvest_pays_exactly_double() {
        let mut single = session(Difficulty::Normal);
        let mut double = session(Difficulty::Normal);
        make_ready(&mut single, 0, "seed_1", 1);
        make_ready(&mut double, 0, "seed_1", 2);
        let PlotAction::Harvested { money: m1, xp: x1, .. } = single.interact(0).unwrap() else {
            panic!("expected harvest");
        };
        let PlotAction::Harvested { money: m2, xp: x2, .. } = double.interact(0).unwrap() else {
            panic!("expected harvest");
        };
        assert_eq!(m2, m1 * 2);
        assert_eq!(x2, x1 * 2);
    }

    #[test]
    fn harvest_with_any_tool() {
        let mut s = session(Difficulty::Normal);
        make_ready(&mut s, 3, "seed_1", 1);
        s.select_tool(ToolKind::Hand).unwrap();
        assert!(matches!(s.interact(3), Ok(PlotAction::Harvested { .. })));
    }

    #[test]
    fn harvest_can_level_up() {
        let mut s = session(Difficulty::Normal);
        make_ready(&mut s, 0, "seed_200", 2);
        let PlotAction::Harvested { levels_gained, .. } = s.interact(0).unwrap() else {
            panic!("expected harvest");
        };
        assert!(levels_gained >= 1);
        assert_eq!(s.player().level, 1 + levels_gained);
        assert!(s.notifications().iter().any(|n| n.message.starts_with("Level Up!")));
    }

    #[test]
    fn shovel_clears_growing_crop() {
        let mut s = session(Difficulty::Normal);
        s.state.player.has_shovel = true;
        s.state.farm.get_mut(0).unwrap().plant("seed_1", 1);
        s.select_tool(ToolKind::Shovel).unwrap();
        let money = s.player().money;
        assert_eq!(s.interact(0), Ok(PlotAction::Cleared));
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Empty);
        assert_eq!(s.player().money, money);
    }

    #[test]
    fn shovel_on_empty_is_noop() {
        let mut s = session(Difficulty::Normal);
        s.state.player.has_shovel = true;
        s.select_tool(ToolKind::Shovel).unwrap();
        assert_eq!(s.interact(0), Ok(PlotAction::Nothing));
    }

    #[test]
    fn withered_plot_clears_without_reward() {
        let mut s = session(Difficulty::Normal);
        let plot = s.state.farm.get_mut(0).unwrap();
        plot.plant("seed_1", 1);
        plot.wither();
        let money = s.player().money;
        assert_eq!(s.interact(0), Ok(PlotAction::ClearedWithered));
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Empty);
        assert_eq!(s.player().money, money);
    }

    #[test]
    fn hoe_on_growing_plot_is_noop() {
        let mut s = session(Difficulty::Normal);
        s.state.farm.get_mut(0).unwrap().plant("seed_1", 1);
        assert_eq!(s.interact(0), Ok(PlotAction::Nothing));
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Growing);
    }

    #[test]
    fn ready_plot_with_unknown_seed_is_left_alone() {
        let mut s = session(Difficulty::Normal);
        make_ready(&mut s, 0, "seed_missing", 1);
        let money = s.player().money;
        assert_eq!(s.interact(0), Ok(PlotAction::Nothing));
        assert_eq!(s.farm().get(0).unwrap().status, PlotStatus::Ready);
        assert_eq!(s.player().money, money);
    }
}
