use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Hand,
    Hoe,
    Seed,
    Shovel,
}

impl ToolKind {
    pub fn parse(s: &str) -> Option<ToolKind> {
        match s.to_ascii_lowercase().as_str() {
            "hand" => Some(ToolKind::Hand),
            "hoe" => Some(ToolKind::Hoe),
            "seed" => Some(ToolKind::Seed),
            "shovel" => Some(ToolKind::Shovel),
            _ => None,
        }
    }
}

/// What the player is currently holding. A seed id is only ever set
/// alongside `ToolKind::Seed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub tool: ToolKind,
    pub seed_id: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            tool: ToolKind::Hoe,
            seed_id: None,
        }
    }
}

impl Selection {
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        if tool != ToolKind::Seed {
            self.seed_id = None;
        }
    }

    pub fn set_seed(&mut self, seed_id: Option<String>) {
        if seed_id.is_some() {
            self.tool = ToolKind::Seed;
        }
        self.seed_id = seed_id;
    }

    pub fn reset(&mut self) {
        *self = Selection::default();
    }
}
