use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{Catalog, Difficulty};
use crate::farm::FarmGrid;
use crate::player::Player;
use crate::simulation::horde::HordeState;

/// Everything that changes during a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub session_id: Uuid,
    pub difficulty: Difficulty,
    pub tick_count: u64,
    /// Session time advanced by ticks, in milliseconds.
    pub elapsed_ms: u64,
    pub player: Player,
    pub farm: FarmGrid,
    pub horde: HordeState,
}

impl GameState {
    /// Default starting state for a new session.
    pub fn new(catalog: &Catalog, difficulty: Difficulty, horde_interval_ms: u64) -> Self {
        let starter_seed = catalog.seeds().first().map(|s| s.id.as_str()).unwrap_or("seed_1");
        let player = Player::new(&catalog.starter_tool().id, starter_seed);
        let farm = FarmGrid::new(player.unlocked_plots);
        GameState {
            session_id: Uuid::new_v4(),
            difficulty,
            tick_count: 0,
            elapsed_ms: 0,
            player,
            farm,
            horde: HordeState::new(horde_interval_ms),
        }
    }
}
