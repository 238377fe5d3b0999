pub mod generator;
pub mod growth;
pub mod horde;
pub mod statistics;

use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::simulation::growth::GrowthContext;
use crate::state::GameState;

/// Result of executing a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub tick: u64,
    /// Plots that reached 100% this tick.
    pub crops_ready: u32,
    /// The horde countdown hit zero this tick.
    pub horde_arrived: bool,
}

/// Execute a single simulation tick.
///
/// Counts the horde timer down (possibly bringing the horde to the gates),
/// then advances every growing plot. Pet growth bonuses are read fresh each
/// tick; the hoe multiplier comes from each plot's tilling snapshot.
pub fn execute_tick<R: Rng + ?Sized>(
    state: &mut GameState,
    catalog: &Catalog,
    tick_ms: u64,
    rng: &mut R,
) -> TickResult {
    // Phase 1: horde countdown
    let horde_arrived = state.horde.tick(tick_ms, state.player.level, rng);

    // Phase 2: crop growth
    let bonuses = catalog.pet_bonuses(&state.player.owned_pets);
    let ctx = GrowthContext {
        tick_secs: tick_ms as f64 / 1000.0,
        pet_growth_bonus: bonuses.growth_speed,
        difficulty_speed: state.difficulty.speed_multiplier(),
    };
    let crops_ready = growth::grow_plots(&mut state.farm, catalog, &ctx);

    state.tick_count += 1;
    state.elapsed_ms += tick_ms;

    if crops_ready > 0 {
        debug!(tick = state.tick_count, crops_ready, "Crops ready");
    }

    TickResult {
        tick: state.tick_count,
        crops_ready,
        horde_arrived,
    }
}
