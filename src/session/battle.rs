use std::time::Duration;

use rand::Rng;
use tracing::info;

use crate::notify::NotificationKind;
use crate::simulation::horde::{apply_outcome, compare_stats, BattleReport, HordePhase};

use super::{GameSession, Rejection};

impl<R: Rng> GameSession<R> {
    /// Start fighting the waiting horde. Returns how long the fight lasts;
    /// the caller finishes it with [`Self::finish_horde_battle`] once that
    /// time has passed.
    pub fn resolve_horde_battle(&mut self) -> Result<Duration, Rejection> {
        if let Err(rejection) = self.state.horde.begin_battle() {
            return self.reject(rejection);
        }
        info!(
            defense = self.state.horde.stats.defense,
            strength = self.state.horde.stats.strength,
            skill = self.state.horde.stats.skill,
            "Battle started"
        );
        Ok(Duration::from_millis(self.config.battle_duration_ms))
    }

    /// Settle the fight in progress against the player's current stats, then
    /// restart the countdown.
    pub fn finish_horde_battle(&mut self) -> Result<BattleReport, Rejection> {
        if self.state.horde.phase != HordePhase::BattleInProgress {
            return self.reject(Rejection::NoBattlePending);
        }
        let outcome = compare_stats(&self.state.player.village_stats, &self.state.horde.stats);
        let report = apply_outcome(
            outcome,
            &mut self.state.player,
            &mut self.state.farm,
            self.config.generator_wins_to_recharge,
            &mut self.rng,
        );

        match &report {
            BattleReport::Victory { reward, recharged, .. } => {
                self.notify(format!("Victory! +${}", reward), NotificationKind::Success);
                if *recharged {
                    self.notify("Generator Recharged!", NotificationKind::Info);
                }
            }
            BattleReport::Defeat {
                money_lost,
                withered_plot,
                ..
            } => {
                let message = match withered_plot {
                    Some(_) => format!("Defeat! Lost ${} & 1 Crop", money_lost),
                    None => format!("Defeat! Lost ${}", money_lost),
                };
                self.notify(message, NotificationKind::Danger);
            }
        }

        self.state.horde.reset();
        info!(
            wins = outcome.wins,
            victory = outcome.victory(),
            streak = self.state.player.horde_win_streak,
            charges = self.state.player.generator_charges,
            "Battle finished"
        );
        Ok(report)
    }
}
