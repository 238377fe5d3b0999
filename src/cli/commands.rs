use std::future::Future;
use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::catalog::pricing::{displayed_sell_price, scaled_price};
use crate::catalog::{Catalog, Difficulty, Rarity};
use crate::cli::console::{parse_command, Command, HELP};
use crate::config::GameConfig;
use crate::farm::PlotStatus;
use crate::notify::NotificationKind;
use crate::player::{Inventory, StatKind, VillageStats};
use crate::session::GameSession;
use crate::simulation::horde::BattleReport;
use crate::snapshot::{build_snapshot_json, compute_plot_diffs};

/// What the driver saw before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub commands: u64,
    pub battles: u64,
}

/// Run a session on stdin until `quit`, end of input or Ctrl-C.
pub async fn run_session(config: &GameConfig, difficulty: Difficulty) -> Result<(), String> {
    let mut session = GameSession::start(difficulty, config);
    if let Some(seed) = session.seed() {
        eprintln!("Session seed: {} (pass --seed {} to replay)", seed, seed);
    }
    println!("{}", HELP);

    let input = BufReader::new(tokio::io::stdin());
    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        eprintln!("\nShutdown signal received");
    };
    let summary = drive(&mut session, input, shutdown).await?;

    let player = session.player();
    eprintln!(
        "Session ended after {} ticks: level {}, ${}, {} battles fought",
        summary.ticks, player.level, player.money, summary.battles
    );
    Ok(())
}

/// The tick driver. Ticks at the configured rate, applies each input line
/// between ticks, and finishes a started battle once its duration elapses.
pub async fn drive<R, I, S>(
    session: &mut GameSession<R>,
    input: I,
    shutdown: S,
) -> Result<RunSummary, String>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut summary = RunSummary::default();
    let mut lines = input.lines();
    let mut notes = session.subscribe();
    let status_every = session.config().status_interval_ticks;

    let period = Duration::from_millis(session.config().tick_rate_ms);
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let battle = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(battle);
    let mut battle_pending = false;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let before = session.farm().plots().to_vec();
                let result = session.tick();
                summary.ticks += 1;
                for change in compute_plot_diffs(&before, session.farm().plots()) {
                    if change.status == Some(PlotStatus::Ready) {
                        println!("Plot #{} is ready to harvest", change.index);
                    }
                }
                if result.tick % status_every == 0 {
                    let stats = session.statistics();
                    info!(
                        tick = stats.tick,
                        money = stats.money,
                        level = stats.level,
                        growing = stats.crops_growing,
                        ready = stats.crops_ready,
                        horde_eta_secs = stats.horde_eta_secs,
                        "Status"
                    );
                }
            }
            () = &mut battle, if battle_pending => {
                battle_pending = false;
                if let Ok(report) = session.finish_horde_battle() {
                    summary.battles += 1;
                    print_battle(&report);
                }
            }
            Ok(note) = notes.recv() => {
                print_notification(note.kind, &note.message);
            }
            line = lines.next_line() => {
                let line = line.map_err(|e| format!("Cannot read input: {}", e))?;
                let Some(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                summary.commands += 1;
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Some(duration) = apply(session, command) {
                            battle.as_mut().reset(Instant::now() + duration);
                            battle_pending = true;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
            () = &mut shutdown => break,
        }
    }

    // Whatever was raised by the last command
    while let Ok(note) = notes.try_recv() {
        print_notification(note.kind, &note.message);
    }
    if battle_pending {
        warn!("Stopped with a battle still in progress");
    }
    Ok(summary)
}

/// Apply one command. Returns the battle duration when a fight starts.
///
/// Rejections are reported to the player through notifications, so they
/// are dropped here.
fn apply<R: Rng>(session: &mut GameSession<R>, command: Command) -> Option<Duration> {
    match command {
        Command::SelectTool(tool) => {
            let _ = session.select_tool(tool);
        }
        Command::SelectSeed(seed) => {
            let _ = session.select_seed(seed.as_deref());
        }
        Command::Click(index) => {
            let _ = session.interact(index);
        }
        Command::BuySeed(id) => {
            let _ = session.buy_seed(&id);
        }
        Command::BuyTool => {
            let _ = session.buy_next_tool();
        }
        Command::BuyShovel => {
            let _ = session.buy_shovel();
        }
        Command::BuyPet(id) => {
            let _ = session.buy_pet(&id);
        }
        Command::Upgrade(stat) => {
            let _ = session.upgrade_village_stat(stat);
        }
        Command::Unlock => {
            let _ = session.unlock_next_plot();
        }
        Command::Generate(amount) => {
            if let Ok(drawn) = session.generate(amount) {
                for (id, count) in &drawn {
                    let name = session.catalog().seed(id).map(|s| s.name.as_str()).unwrap_or("?");
                    println!("  {} x{} ({})", name, count, id);
                }
            }
        }
        Command::UpgradeGenerator => {
            let _ = session.upgrade_generator();
        }
        Command::Fight => {
            if let Ok(duration) = session.resolve_horde_battle() {
                println!("The battle begins...");
                return Some(duration);
            }
        }
        Command::State => println!("{}", build_snapshot_json(session)),
        Command::Status => print_status(session),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    None
}

fn print_notification(kind: NotificationKind, message: &str) {
    let tag = match kind {
        NotificationKind::Success => "ok",
        NotificationKind::Danger => "!!",
        NotificationKind::Info => "--",
        NotificationKind::Earning => "$$",
    };
    println!("[{}] {}", tag, message);
}

fn print_battle(report: &BattleReport) {
    match report {
        BattleReport::Victory { wins, .. } => println!("Battle won ({}/3 stats)", wins),
        BattleReport::Defeat { wins, .. } => println!("Battle lost ({}/3 stats)", wins),
    }
}

fn print_status<R: Rng>(session: &GameSession<R>) {
    let stats = session.statistics();
    let player = session.player();
    let horde = session.horde();
    println!(
        "Tick {} | ${} | Lv {} ({}/{} xp) | Plots {}/{} | Growing {} | Ready {} | Seeds {}",
        stats.tick,
        stats.money,
        stats.level,
        player.xp,
        player.xp_to_next,
        player.unlocked_plots,
        session.farm().len(),
        stats.crops_growing,
        stats.crops_ready,
        stats.seeds_held,
    );
    println!(
        "Village {} | Horde {:?} in {:.1}s (DEF {} STR {} SKL {}) | Generator Lv {} x{}",
        stat_line(&player.village_stats),
        stats.horde_phase,
        stats.horde_eta_secs,
        horde.stats.defense,
        horde.stats.strength,
        horde.stats.skill,
        player.generator_level,
        player.generator_charges,
    );
    if !player.inventory.is_empty() {
        println!("Seeds {}", inventory_line(&player.inventory));
    }
    let selection = session.selection();
    match &selection.seed_id {
        Some(id) => println!("Holding {:?} ({})", selection.tool, id),
        None => println!("Holding {:?}", selection.tool),
    }
}

fn stat_line(stats: &VillageStats) -> String {
    StatKind::all()
        .iter()
        .map(|kind| format!("{} {}", kind.label(), stats.get(*kind)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn inventory_line(inventory: &Inventory) -> String {
    inventory
        .iter()
        .map(|(id, count)| format!("{} x{}", id, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the catalog a session started from `seed` would use.
pub fn print_catalog(seed: u64, difficulty: Difficulty, rarity: Option<Rarity>) {
    let catalog = Catalog::generate(&mut ChaCha8Rng::seed_from_u64(seed));

    println!("=== Seeds (seed {}, {:?}) ===", seed, difficulty);
    println!(
        "{:<10} {:<24} {:<9} {:>7} {:>7} {:>6} {:>5}",
        "Id", "Name", "Rarity", "Price", "Sell", "Grow", "Lvl"
    );
    println!("{}", "-".repeat(74));
    let seeds = catalog
        .seeds()
        .iter()
        .filter(|s| rarity.is_none_or(|r| s.rarity == r));
    for s in seeds {
        println!(
            "{:<10} {:<24} {:<9} {:>7} {:>7} {:>5}s {:>5}",
            s.id,
            s.name,
            format!("{:?}", s.rarity),
            scaled_price(s.base_price, difficulty),
            displayed_sell_price(s, difficulty),
            s.grow_time_secs,
            s.req_level
        );
    }

    if rarity.is_some() {
        return;
    }

    println!();
    println!("=== Hoes ===");
    for t in catalog.tools() {
        println!(
            "{:<14} {:<12} x{:.1} growth  ${:>6}  till ${}{}",
            t.id,
            t.name,
            t.growth_multiplier,
            scaled_price(t.price, difficulty),
            t.action_cost,
            if t.can_double_seed { "  double seed" } else { "" }
        );
    }

    println!();
    println!("=== Pets ===");
    for p in catalog.pets() {
        println!(
            "{:<12} {:<14} ${:>6}  {}",
            p.id,
            p.name,
            scaled_price(p.price, difficulty),
            p.description
        );
    }
}
