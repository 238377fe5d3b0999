pub mod battle;
pub mod interact;
pub mod rejection;
pub mod selection;
pub mod shop;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::catalog::{Catalog, Difficulty, PetBonuses};
use crate::config::GameConfig;
use crate::farm::FarmGrid;
use crate::notify::{Notification, NotificationKind, NotificationLog};
use crate::player::Player;
use crate::simulation::horde::HordeState;
use crate::simulation::statistics::{compute_statistics, TickStatistics};
use crate::simulation::{self, TickResult};
use crate::snapshot::SessionSnapshot;
use crate::state::GameState;

pub use interact::PlotAction;
pub use rejection::Rejection;
pub use selection::{Selection, ToolKind};

/// The controller for one play session.
///
/// Owns all mutable game state. Every action runs to completion before the
/// next one or the next tick; drive a session from a single task.
pub struct GameSession<R: Rng = ChaCha8Rng> {
    catalog: Catalog,
    state: GameState,
    selection: Selection,
    notifications: NotificationLog,
    config: GameConfig,
    rng: R,
    seed: Option<u64>,
}

impl GameSession<ChaCha8Rng> {
    /// Start a session seeded from `config.rng_seed`, or from a random seed
    /// when it is 0. The seed actually used is available from [`Self::seed`].
    pub fn start(difficulty: Difficulty, config: &GameConfig) -> Self {
        let seed = if config.rng_seed == 0 {
            rand::thread_rng().r#gen()
        } else {
            config.rng_seed
        };
        let mut session = Self::with_rng(difficulty, config, ChaCha8Rng::seed_from_u64(seed));
        session.seed = Some(seed);
        session
    }
}

impl<R: Rng> GameSession<R> {
    /// Start a session drawing all randomness (catalog names, horde rolls,
    /// generator draws, defeat victims) from `rng`.
    pub fn with_rng(difficulty: Difficulty, config: &GameConfig, mut rng: R) -> Self {
        let catalog = Catalog::generate(&mut rng);
        let state = GameState::new(&catalog, difficulty, config.horde_interval_ms());
        info!(
            session = %state.session_id,
            ?difficulty,
            seeds = catalog.seeds().len(),
            "Session started"
        );
        GameSession {
            catalog,
            state,
            selection: Selection::default(),
            notifications: NotificationLog::new(config.notification_ttl_ms),
            config: config.clone(),
            rng,
            seed: None,
        }
    }

    /// Advance growth and the horde timer by one tick.
    pub fn tick(&mut self) -> TickResult {
        let result = simulation::execute_tick(
            &mut self.state,
            &self.catalog,
            self.config.tick_rate_ms,
            &mut self.rng,
        );
        self.notifications.expire(self.state.elapsed_ms);
        if result.horde_arrived {
            self.notify("The horde is at the gates!", NotificationKind::Danger);
        }
        result
    }

    // === Selection ===

    pub fn select_tool(&mut self, tool: ToolKind) -> Result<(), Rejection> {
        if tool == ToolKind::Shovel && !self.state.player.has_shovel {
            return self.reject(Rejection::ToolNotOwned("shovel"));
        }
        self.selection.set_tool(tool);
        Ok(())
    }

    pub fn select_seed(&mut self, seed_id: Option<&str>) -> Result<(), Rejection> {
        if let Some(id) = seed_id {
            if self.catalog.seed(id).is_none() {
                return self.reject(Rejection::UnknownItem(id.to_string()));
            }
        }
        self.selection.set_seed(seed_id.map(str::to_string));
        Ok(())
    }

    // === Read-only views ===

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn farm(&self) -> &FarmGrid {
        &self.state.farm
    }

    pub fn horde(&self) -> &HordeState {
        &self.state.horde
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The seed this session's RNG was built from, if it was seeded here.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.active()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub fn statistics(&self) -> TickStatistics {
        compute_statistics(&self.state)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    pub fn pet_bonuses(&self) -> PetBonuses {
        self.catalog.pet_bonuses(&self.state.player.owned_pets)
    }

    // === Internal ===

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.notifications.push(message, kind, self.state.elapsed_ms);
    }

    /// Surface a rejection to the player and hand it back to the caller.
    fn reject<T>(&mut self, rejection: Rejection) -> Result<T, Rejection> {
        debug!(%rejection, "Action rejected");
        self.notify(rejection.to_string(), NotificationKind::Danger);
        Err(rejection)
    }
}
