pub mod plot;

use serde::{Deserialize, Serialize};

use crate::catalog::MAX_PLOTS;
pub use plot::{Plot, PlotStatus};

/// Every plot slot on the farm, indexed from 0. Always `MAX_PLOTS` long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmGrid {
    plots: Vec<Plot>,
}

impl FarmGrid {
    pub fn new(unlocked: u32) -> Self {
        let plots = (0..MAX_PLOTS).map(|i| Plot::new(i, i < unlocked)).collect();
        FarmGrid { plots }
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plots_mut(&mut self) -> &mut [Plot] {
        &mut self.plots
    }

    pub fn get(&self, index: u32) -> Option<&Plot> {
        self.plots.get(index as usize)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut Plot> {
        self.plots.get_mut(index as usize)
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Open the lowest-index locked plot. Returns its index, or None if the
    /// farm is fully expanded.
    pub fn unlock_next(&mut self) -> Option<u32> {
        let plot = self.plots.iter_mut().find(|p| p.status == PlotStatus::Locked)?;
        plot.status = PlotStatus::Empty;
        Some(plot.index)
    }

    pub fn count(&self, status: PlotStatus) -> usize {
        self.plots.iter().filter(|p| p.status == status).count()
    }

    /// Indices of plots holding a growing or ready crop.
    pub fn crop_indices(&self) -> Vec<u32> {
        self.plots
            .iter()
            .filter(|p| p.status.has_crop())
            .map(|p| p.index)
            .collect()
    }
}
