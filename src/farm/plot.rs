use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    Locked,
    Empty,
    Tilled,
    Growing,
    Ready,
    Withered,
}

impl PlotStatus {
    pub fn all() -> &'static [PlotStatus] {
        &[
            PlotStatus::Locked,
            PlotStatus::Empty,
            PlotStatus::Tilled,
            PlotStatus::Growing,
            PlotStatus::Ready,
            PlotStatus::Withered,
        ]
    }

    /// Holds a live crop the horde can destroy.
    pub fn has_crop(self) -> bool {
        matches!(self, PlotStatus::Growing | PlotStatus::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub index: u32,
    pub status: PlotStatus,
    pub seed_id: Option<String>,
    /// 1, or 2 when planted with a double-seed hoe.
    pub seed_count: u32,
    /// 0.0 to 100.0
    pub progress: f64,
    /// Hoe multiplier captured when the plot was tilled.
    pub growth_multiplier: f64,
}

impl Plot {
    pub fn new(index: u32, unlocked: bool) -> Self {
        Plot {
            index,
            status: if unlocked { PlotStatus::Empty } else { PlotStatus::Locked },
            seed_id: None,
            seed_count: 1,
            progress: 0.0,
            growth_multiplier: 1.0,
        }
    }

    /// Back to bare soil. The tilling snapshot is kept until the next till.
    pub fn clear(&mut self) {
        self.status = PlotStatus::Empty;
        self.seed_id = None;
        self.seed_count = 1;
        self.progress = 0.0;
    }

    pub fn till(&mut self, growth_multiplier: f64) {
        self.status = PlotStatus::Tilled;
        self.growth_multiplier = growth_multiplier;
        self.seed_count = 1;
    }

    pub fn plant(&mut self, seed_id: &str, seed_count: u32) {
        self.status = PlotStatus::Growing;
        self.seed_id = Some(seed_id.to_string());
        self.seed_count = seed_count;
        self.progress = 0.0;
    }

    /// Destroy the crop in place; the plot must be cleared before reuse.
    pub fn wither(&mut self) {
        self.status = PlotStatus::Withered;
        self.seed_id = None;
    }
}
