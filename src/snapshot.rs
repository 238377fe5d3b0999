use rand::Rng;
use serde::Serialize;

use crate::catalog::pricing::{plot_unlock_cost, scaled_price, village_stat_cost};
use crate::catalog::{Difficulty, GENERATOR_MAX_LEVEL, GENERATOR_UPGRADE_COST, MAX_PLOTS, SHOVEL_PRICE};
use crate::farm::{Plot, PlotStatus};
use crate::notify::Notification;
use crate::player::Player;
use crate::session::{GameSession, Selection};
use crate::simulation::horde::HordeState;

/// Everything a presentation layer needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub difficulty: Difficulty,
    pub tick: u64,
    pub player: Player,
    pub plots: Vec<Plot>,
    pub horde: HordeState,
    pub selection: Selection,
    pub prices: PriceBoard,
    pub notifications: Vec<Notification>,
}

/// Current prices for the player's next purchases. `None` where nothing is
/// left to buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBoard {
    pub next_tool_id: Option<String>,
    pub next_tool: Option<u64>,
    pub shovel: Option<u64>,
    pub plot_unlock: Option<u64>,
    pub defense: u64,
    pub strength: u64,
    pub skill: u64,
    pub generator_upgrade: Option<u64>,
}

/// Changed fields for one plot between two states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotChange {
    pub index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PlotStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_id: Option<Option<String>>,
}

impl SessionSnapshot {
    pub fn from_session<R: Rng>(session: &GameSession<R>) -> Self {
        let state = session.state();
        SessionSnapshot {
            session_id: state.session_id.to_string(),
            difficulty: state.difficulty,
            tick: state.tick_count,
            player: state.player.clone(),
            plots: state.farm.plots().to_vec(),
            horde: state.horde.clone(),
            selection: session.selection().clone(),
            prices: PriceBoard::from_session(session),
            notifications: session.notifications().to_vec(),
        }
    }
}

impl PriceBoard {
    pub fn from_session<R: Rng>(session: &GameSession<R>) -> Self {
        let player = session.player();
        let difficulty = session.difficulty();
        let next_tool = session.catalog().next_tool(&player.equipped_tool_id);
        let stats = &player.village_stats;
        PriceBoard {
            next_tool_id: next_tool.map(|t| t.id.clone()),
            next_tool: next_tool.map(|t| scaled_price(t.price, difficulty)),
            shovel: (!player.has_shovel).then(|| scaled_price(SHOVEL_PRICE, difficulty)),
            plot_unlock: (player.unlocked_plots < MAX_PLOTS)
                .then(|| plot_unlock_cost(player.unlocked_plots, difficulty)),
            defense: village_stat_cost(stats.defense, difficulty),
            strength: village_stat_cost(stats.strength, difficulty),
            skill: village_stat_cost(stats.skill, difficulty),
            generator_upgrade: (player.generator_level < GENERATOR_MAX_LEVEL)
                .then_some(GENERATOR_UPGRADE_COST),
        }
    }
}

pub fn build_snapshot_json<R: Rng>(session: &GameSession<R>) -> String {
    let snapshot = SessionSnapshot::from_session(session);
    serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
}

/// Compute plot-level diffs between two farm states.
/// Returns only plots whose status, progress or seed changed.
pub fn compute_plot_diffs(before: &[Plot], after: &[Plot]) -> Vec<PlotChange> {
    let mut changes = Vec::new();

    for (old, new) in before.iter().zip(after.iter()) {
        let status_changed = old.status != new.status;
        let progress_changed = old.progress != new.progress;
        let seed_changed = old.seed_id != new.seed_id;

        if status_changed || progress_changed || seed_changed {
            changes.push(PlotChange {
                index: new.index,
                status: status_changed.then_some(new.status),
                progress: progress_changed.then_some(new.progress),
                seed_id: seed_changed.then(|| new.seed_id.clone()),
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::farm::FarmGrid;

    fn session() -> GameSession {
        let config = GameConfig {
            rng_seed: 3,
            ..GameConfig::default()
        };
        GameSession::start(Difficulty::Hard, &config)
    }

    #[test]
    fn snapshot_json_is_valid() {
        let s = session();
        let json = build_snapshot_json(&s);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("message_type").is_none());
        assert_eq!(parsed["difficulty"], "hard");
        assert_eq!(parsed["plots"].as_array().unwrap().len(), MAX_PLOTS as usize);
        assert_eq!(parsed["player"]["money"], 100);
        assert_eq!(parsed["horde"]["phase"], "countdown");
        assert_eq!(parsed["selection"]["tool"], "hoe");
    }

    #[test]
    fn price_board_scales_with_difficulty() {
        let s = session();
        let prices = PriceBoard::from_session(&s);
        assert_eq!(prices.next_tool_id.as_deref(), Some("hoe_1"));
        assert_eq!(prices.next_tool, Some(1500));
        assert_eq!(prices.shovel, Some(750));
        assert_eq!(prices.plot_unlock, Some(750));
        // floor(500 * 1.5) = 750, then * 1.5
        assert_eq!(prices.defense, 1125);
        assert_eq!(prices.generator_upgrade, Some(GENERATOR_UPGRADE_COST));
    }

    #[test]
    fn notifications_included() {
        let mut s = session();
        let _ = s.buy_shovel();
        let snapshot = SessionSnapshot::from_session(&s);
        assert_eq!(snapshot.notifications.len(), 1);
    }

    #[test]
    fn diffs_only_report_changed_plots() {
        let before = FarmGrid::new(9);
        let mut after = before.clone();
        after.get_mut(2).unwrap().till(1.0);
        after.get_mut(4).unwrap().plant("seed_1", 1);
        after.get_mut(4).unwrap().progress = 12.5;

        let diffs = compute_plot_diffs(before.plots(), after.plots());
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].index, 2);
        assert_eq!(diffs[0].status, Some(PlotStatus::Tilled));
        assert_eq!(diffs[0].progress, None);
        assert_eq!(diffs[1].index, 4);
        assert_eq!(diffs[1].progress, Some(12.5));
        assert_eq!(diffs[1].seed_id, Some(Some("seed_1".to_string())));
    }

    #[test]
    fn no_diffs_for_identical_farms() {
        let farm = FarmGrid::new(9);
        assert!(compute_plot_diffs(farm.plots(), farm.plots()).is_empty());
    }
}
