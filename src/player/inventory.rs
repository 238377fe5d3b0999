use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Seed id to count. Entries never hold zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    seeds: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn count(&self, seed_id: &str) -> u32 {
        self.seeds.get(seed_id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, seed_id: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.seeds.entry(seed_id.to_string()).or_insert(0) += count;
    }

    /// Merge a batch of drawn seeds.
    pub fn merge(&mut self, drawn: &BTreeMap<String, u32>) {
        for (id, count) in drawn {
            self.add(id, *count);
        }
    }

    /// Remove `count` of a seed. Fails without change if fewer are held.
    pub fn remove(&mut self, seed_id: &str, count: u32) -> bool {
        let Some(held) = self.seeds.get_mut(seed_id) else {
            return false;
        };
        if *held < count {
            return false;
        }
        *held -= count;
        if *held == 0 {
            self.seeds.remove(seed_id);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.seeds.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.seeds.values().map(|c| *c as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}
