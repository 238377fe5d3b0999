use tracing::debug;

use crate::catalog::Catalog;
use crate::farm::{FarmGrid, Plot, PlotStatus};

/// Progress added to a growing plot in one tick.
///
/// `100 / (base_secs / tick_secs)` is the unmodified per-tick share; hoe
/// snapshot, pet bonus and difficulty scale it multiplicatively.
pub fn growth_increment(
    base_grow_secs: f64,
    tick_secs: f64,
    tool_multiplier: f64,
    pet_growth_bonus: f64,
    difficulty_speed: f64,
) -> f64 {
    let ticks_to_grow = base_grow_secs / tick_secs;
    (100.0 / ticks_to_grow) * tool_multiplier * (1.0 + pet_growth_bonus) * difficulty_speed
}

/// Shared per-tick inputs to the growth engine.
#[derive(Debug, Clone, Copy)]
pub struct GrowthContext {
    pub tick_secs: f64,
    pub pet_growth_bonus: f64,
    pub difficulty_speed: f64,
}

/// Advance one plot by one tick. Returns true if it became ready.
///
/// Plots that are not growing, or whose seed cannot be resolved, are left
/// untouched.
pub fn advance_plot(plot: &mut Plot, catalog: &Catalog, ctx: &GrowthContext) -> bool {
    if plot.status != PlotStatus::Growing {
        return false;
    }
    let Some(seed) = plot.seed_id.as_deref().and_then(|id| catalog.seed(id)) else {
        debug!(plot = plot.index, seed = ?plot.seed_id, "Skipping plot with unknown seed");
        return false;
    };
    if seed.grow_time_secs == 0 {
        return false;
    }

    let increment = growth_increment(
        seed.grow_time_secs as f64,
        ctx.tick_secs,
        plot.growth_multiplier,
        ctx.pet_growth_bonus,
        ctx.difficulty_speed,
    );
    let next = plot.progress + increment;
    if next >= 100.0 {
        plot.progress = 100.0;
        plot.status = PlotStatus::Ready;
        true
    } else {
        plot.progress = next;
        false
    }
}

/// Advance every growing plot. Returns the number that became ready.
pub fn grow_plots(farm: &mut FarmGrid, catalog: &Catalog, ctx: &GrowthContext) -> u32 {
    farm.plots_mut()
        .iter_mut()
        .map(|plot| advance_plot(plot, catalog, ctx) as u32)
        .sum()
}
