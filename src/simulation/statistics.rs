use std::collections::HashMap;

use serde::Serialize;

use crate::farm::PlotStatus;
use crate::simulation::horde::HordePhase;
use crate::state::GameState;

/// Per-tick aggregate metrics for status lines and introspection.
#[derive(Debug, Clone, Serialize)]
pub struct TickStatistics {
    pub tick: u64,
    pub plot_distribution: HashMap<PlotStatus, u32>,
    pub crops_growing: u32,
    pub crops_ready: u32,
    /// Mean progress over growing plots, 0 when none are growing.
    pub avg_progress: f64,
    pub horde_phase: HordePhase,
    pub horde_eta_secs: f64,
    pub money: i64,
    pub level: u32,
    pub seeds_held: u64,
}

/// Compute statistics for the current state after a tick.
pub fn compute_statistics(state: &GameState) -> TickStatistics {
    let mut distribution: HashMap<PlotStatus, u32> =
        PlotStatus::all().iter().map(|status| (*status, 0)).collect();
    let mut progress_sum = 0.0_f64;

    for plot in state.farm.plots() {
        *distribution.entry(plot.status).or_insert(0) += 1;
        if plot.status == PlotStatus::Growing {
            progress_sum += plot.progress;
        }
    }

    let growing = distribution.get(&PlotStatus::Growing).copied().unwrap_or(0);
    let ready = distribution.get(&PlotStatus::Ready).copied().unwrap_or(0);
    let avg_progress = if growing > 0 { progress_sum / growing as f64 } else { 0.0 };

    TickStatistics {
        tick: state.tick_count,
        plot_distribution: distribution,
        crops_growing: growing,
        crops_ready: ready,
        avg_progress,
        horde_phase: state.horde.phase,
        horde_eta_secs: state.horde.time_left_secs(),
        money: state.player.money,
        level: state.player.level,
        seeds_held: state.player.inventory.total(),
    }
}
