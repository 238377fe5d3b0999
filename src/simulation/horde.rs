use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{VICTORY_REWARD, VICTORY_REWARD_FLAWLESS};
use crate::farm::FarmGrid;
use crate::player::{Player, VillageStats};
use crate::session::Rejection;

/// Which part of the encounter cycle the horde is in. Exactly one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HordePhase {
    Countdown,
    AwaitingResolution,
    BattleInProgress,
}

/// Stats shown for the horde between encounters.
pub const PLACEHOLDER_STATS: VillageStats = VillageStats {
    defense: 1,
    strength: 1,
    skill: 1,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HordeState {
    pub phase: HordePhase,
    /// Countdown in milliseconds; integer so repeated ticks land exactly on 0.
    pub time_left_ms: u64,
    pub interval_ms: u64,
    pub stats: VillageStats,
}

impl HordeState {
    pub fn new(interval_ms: u64) -> Self {
        HordeState {
            phase: HordePhase::Countdown,
            time_left_ms: interval_ms,
            interval_ms,
            stats: VillageStats::uniform(3),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == HordePhase::AwaitingResolution
    }

    pub fn battle_in_progress(&self) -> bool {
        self.phase == HordePhase::BattleInProgress
    }

    pub fn time_left_secs(&self) -> f64 {
        self.time_left_ms as f64 / 1000.0
    }

    /// Count down by one tick. When the timer reaches zero the horde arrives
    /// with stats rolled for `player_level`. Returns true on arrival.
    ///
    /// Only the countdown phase advances; a waiting or fighting horde holds.
    pub fn tick<R: Rng + ?Sized>(&mut self, tick_ms: u64, player_level: u32, rng: &mut R) -> bool {
        if self.phase != HordePhase::Countdown {
            return false;
        }
        self.time_left_ms = self.time_left_ms.saturating_sub(tick_ms);
        if self.time_left_ms > 0 {
            return false;
        }
        self.stats = roll_horde_stats(player_level, rng);
        self.phase = HordePhase::AwaitingResolution;
        info!(
            level = player_level,
            defense = self.stats.defense,
            strength = self.stats.strength,
            skill = self.stats.skill,
            "Horde at the gates"
        );
        true
    }

    /// Start the fight. Only a waiting horde can be fought, and only once.
    pub fn begin_battle(&mut self) -> Result<(), Rejection> {
        match self.phase {
            HordePhase::AwaitingResolution => {
                self.phase = HordePhase::BattleInProgress;
                Ok(())
            }
            HordePhase::BattleInProgress => Err(Rejection::BattleInProgress),
            HordePhase::Countdown => Err(Rejection::NoHordeWaiting),
        }
    }

    /// Back to a full countdown with placeholder stats.
    pub fn reset(&mut self) {
        self.phase = HordePhase::Countdown;
        self.time_left_ms = self.interval_ms;
        self.stats = PLACEHOLDER_STATS;
    }
}

/// One horde stat: `max(1, base + roll - variance)` with `roll` uniform in
/// `[0, 2 * variance)`.
pub fn roll_stat<R: Rng + ?Sized>(player_level: u32, rng: &mut R) -> u32 {
    let base = 2 + player_level as i64;
    let variance = 2 + (player_level / 2) as i64;
    let roll = rng.gen_range(0..variance * 2);
    (base + roll - variance).max(1) as u32
}

pub fn roll_horde_stats<R: Rng + ?Sized>(player_level: u32, rng: &mut R) -> VillageStats {
    VillageStats {
        defense: roll_stat(player_level, rng),
        strength: roll_stat(player_level, rng),
        skill: roll_stat(player_level, rng),
    }
}

/// Pairwise comparison; ties go to the village.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub wins: u32,
}

impl BattleOutcome {
    pub fn victory(&self) -> bool {
        self.wins >= 2
    }

    pub fn flawless(&self) -> bool {
        self.wins == 3
    }
}

/// Compare the village's own stats against the horde, one win per stat
/// that matches or beats it.
pub fn compare_stats(village: &VillageStats, horde: &VillageStats) -> BattleOutcome {
    let wins = [
        village.defense >= horde.defense,
        village.strength >= horde.strength,
        village.skill >= horde.skill,
    ]
    .iter()
    .filter(|won| **won)
    .count() as u32;
    BattleOutcome { wins }
}

/// What the battle did to the player and farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BattleReport {
    Victory {
        wins: u32,
        reward: i64,
        recharged: bool,
    },
    Defeat {
        wins: u32,
        money_lost: i64,
        withered_plot: Option<u32>,
    },
}

/// Apply a resolved battle to the player and farm.
///
/// Victory pays a flat reward and advances the win streak, converting
/// `wins_to_recharge` consecutive wins into one generator charge. Defeat costs
/// 10% of the non-negative balance, resets the streak and withers one random
/// crop if any exist.
pub fn apply_outcome<R: Rng + ?Sized>(
    outcome: BattleOutcome,
    player: &mut Player,
    farm: &mut FarmGrid,
    wins_to_recharge: u32,
    rng: &mut R,
) -> BattleReport {
    if outcome.victory() {
        let reward = if outcome.flawless() { VICTORY_REWARD_FLAWLESS } else { VICTORY_REWARD };
        player.money += reward;
        player.horde_win_streak += 1;
        let recharged = player.horde_win_streak >= wins_to_recharge;
        if recharged {
            player.generator_charges += 1;
            player.horde_win_streak = 0;
        }
        return BattleReport::Victory {
            wins: outcome.wins,
            reward,
            recharged,
        };
    }

    let money_lost = player.money.max(0) / 10;
    player.money -= money_lost;
    player.horde_win_streak = 0;

    let crops = farm.crop_indices();
    let withered_plot = if crops.is_empty() {
        None
    } else {
        let victim = crops[rng.gen_range(0..crops.len())];
        if let Some(plot) = farm.get_mut(victim) {
            plot.wither();
        }
        Some(victim)
    };

    BattleReport::Defeat {
        wins: outcome.wins,
        money_lost,
        withered_plot,
    }
}
