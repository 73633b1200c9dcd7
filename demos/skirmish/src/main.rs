//! skirmish: smallest end-to-end run of the NPC decision engine.
//!
//! Spawns a patrolling guard and an archer against a warrior, runs the
//! population for a few dozen ticks while logging combat and behavior events,
//! prints and exports the final world state, then prints a GOAP plan for an
//! armed soldier.
//!
//! Usage: `skirmish [config.json]`.  With `LLM_API_KEY` set, one extra NPC
//! is generated from a text description and joins the player's side.

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use npc_core::{Position, SimConfig, Tick};
use npc_llm::{BlueprintGenerator, LlmClient};
use npc_output::{EventWriter, PersistenceObserver, export_world_state};
use npc_sim::{SimObserver, Simulation};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_TICKS: u64  = 30;
const OUTPUT_DIR:    &str = "output/skirmish";
const EXTRA_NPC:     &str = "a sly bandit who strikes from cover and retreats when hurt";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: EventWriter> {
    inner:         PersistenceObserver<W>,
    combat_rows:   usize,
    behavior_rows: usize,
}

impl<W: EventWriter> CountingObserver<W> {
    fn new(inner: PersistenceObserver<W>) -> Self {
        Self { inner, combat_rows: 0, behavior_rows: 0 }
    }
}

impl<W: EventWriter> SimObserver for CountingObserver<W> {
    fn on_combat(&mut self, event: &npc_agent::CombatEvent) {
        self.combat_rows += 1;
        self.inner.on_combat(event);
    }

    fn on_behavior(&mut self, event: &npc_agent::BehaviorEvent) {
        self.behavior_rows += 1;
        self.inner.on_behavior(event);
    }

    fn on_tick_end(&mut self, tick: Tick, alive: usize) {
        self.inner.on_tick_end(tick, alive);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig { total_ticks: DEFAULT_TICKS, ..SimConfig::default() });
    };
    let file = std::fs::File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let config: SimConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<npc_output::CsvWriter> {
    Ok(npc_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<npc_output::SqliteWriter> {
    Ok(npc_output::SqliteWriter::new(dir)?)
}

/// Generate one extra NPC from a description and set it against the
/// defenders.  Skipped without an API key; a failed call spawns the default
/// blueprint.
async fn spawn_generated(sim: &mut Simulation, cast: &scenario::Skirmish) -> Result<()> {
    let client = match LlmClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            info!(reason = %e, "skipping generated NPC");
            return Ok(());
        }
    };
    let blueprint = BlueprintGenerator::new(client).generate(EXTRA_NPC).await;
    let id = sim.spawn(&blueprint.kind, &blueprint.name, Position::new(20.0, 0.0, 20.0), blueprint.overrides())?;
    sim.form_group(&[cast.player, id]);
    sim.add_enemies(&[id], &[cast.guard, cast.archer]);
    println!("Generated NPC: {} ({}, {})", blueprint.name, blueprint.kind, blueprint.personality);
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== skirmish ===");

    // 1. Config.
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    println!("Ticks: {}  |  Tick: {} s  |  Seed: {}", config.total_ticks, config.tick_duration_secs, config.seed);

    // 2. Population.
    let mut sim = Simulation::new(config)?;
    let cast = scenario::populate(&mut sim)?;
    spawn_generated(&mut sim, &cast).await?;
    println!("Agents: {}", sim.store.len());
    println!();

    // 3. Output.
    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir)?;
    let mut inner = PersistenceObserver::new(open_writer(dir)?, Utc::now());
    inner.record_agents(&sim.store);
    let mut obs = CountingObserver::new(inner);

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  combat events   : {}", obs.combat_rows);
    println!("  behavior events : {}", obs.behavior_rows);
    println!();

    // 5. World state.
    let world = sim.world_state();
    println!("{}", serde_json::to_string_pretty(&world)?);
    let path = export_world_state(&dir.join("exports"), &world)?;
    println!("Exported: {}", path.display());
    println!();

    // 6. Plan.
    let plan = sim.plan_for(&scenario::soldier_start(), &scenario::enemy_dead());
    println!("GOAP plan: {:?}  (cost {:.2})", plan.names(), plan.cost);

    Ok(())
}
