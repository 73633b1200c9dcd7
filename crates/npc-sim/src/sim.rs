//! The `Simulation` population manager and its tick loop.

use npc_agent::{Agent, AgentBuilder, AgentEvent, AgentStore, SpawnOverrides};
use npc_core::{AgentId, Position, SimConfig, SimRng, Tick};
use npc_goap::{GoapPlanner, Plan, WorldState};
use npc_spatial::GridPathfinder;
use tracing::{debug, info};

use crate::{NoopObserver, SimBuilder, SimObserver, SimResult, WorldSnapshot};

/// Owns every agent plus the subsystems they share.
///
/// Each tick:
///
/// 1. Every agent that is alive at the moment its turn comes is ticked once,
///    in ascending id order.  An agent killed earlier in the same tick does
///    not act; an agent attacked earlier in the tick reacts to its updated
///    state.
/// 2. Combat and behavior events emitted during the tick are forwarded to
///    the observer in emission order.
/// 3. The clock advances by one tick.
///
/// Create via [`Simulation::new`] or [`SimBuilder`].
pub struct Simulation {
    pub config: SimConfig,

    /// Every agent, the clock, and the cover points.  Also the context every
    /// brain ticks against.
    pub store: AgentStore,

    /// Shared grid for path queries.
    pub pathfinder: GridPathfinder,

    /// Shared action planner.
    pub planner: GoapPlanner,

    /// Placement scatter for group spawns.
    pub(crate) rng: SimRng,
}

impl Simulation {
    /// A simulation with no cover points, an open grid, and the standard
    /// action catalog.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        SimBuilder::new(config).build()
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Spawn one agent from `template` (unknown names fall back to the
    /// default template).
    pub fn spawn(
        &mut self,
        template:  &str,
        name:      &str,
        position:  Position,
        overrides: SpawnOverrides,
    ) -> SimResult<AgentId> {
        let builder = AgentBuilder::new(template).name(name).position(position).overrides(overrides);
        Ok(self.store.spawn(builder)?)
    }

    /// Spawn `count` agents from one template scattered uniformly within
    /// `spread` of `center`, and make them one ally group.  Names default to
    /// `<template>_<id>`.
    pub fn spawn_group(
        &mut self,
        template:  &str,
        count:     usize,
        center:    Position,
        spread:    f32,
        overrides: &SpawnOverrides,
    ) -> SimResult<Vec<AgentId>> {
        let spread = spread.max(0.0);
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let dx = self.rng.gen_range(-spread..=spread);
            let dz = self.rng.gen_range(-spread..=spread);
            let builder = AgentBuilder::new(template)
                .position(center.offset(dx, dz))
                .overrides(overrides.clone());
            ids.push(self.store.spawn(builder)?);
        }
        self.store.form_group(&ids);
        debug!(template, count, "spawned group");
        Ok(ids)
    }

    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        self.store.despawn(id)
    }

    /// Replace each listed agent's allies with the other listed agents.
    pub fn form_group(&mut self, ids: &[AgentId]) {
        self.store.form_group(ids);
    }

    /// Make every agent in `a` and every agent in `b` mutual enemies.
    pub fn add_enemies(&mut self, a: &[AgentId], b: &[AgentId]) {
        self.store.add_enemies(a, b);
    }

    pub fn add_cover_point(&mut self, p: Position) {
        self.store.add_cover_point(p);
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.store.get(id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.store.get_mut(id)
    }

    pub fn current_tick(&self) -> Tick {
        self.store.clock().current_tick
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance every living agent by one tick.  Returns how many acted.
    pub fn tick_all(&mut self) -> usize {
        self.process_tick(&mut NoopObserver)
    }

    /// Call [`tick_all`](Self::tick_all) `n` times.
    pub fn simulate(&mut self, n: u64) {
        for _ in 0..n {
            self.tick_all();
        }
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        info!(agents = self.store.len(), ticks = self.config.total_ticks, "simulation started");
        while self.current_tick() < self.config.end_tick() {
            self.process_tick(observer);
        }
        observer.on_sim_end(self.current_tick());
        info!(alive = self.store.living_count(), tick = %self.current_tick(), "simulation finished");
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.process_tick(observer);
        }
    }

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> usize {
        let now = self.current_tick();
        observer.on_tick_start(now);

        let mut acted = 0;
        for id in self.store.ids() {
            if self.store.tick_agent(id).is_some() {
                acted += 1;
            }
        }

        for event in self.store.drain_events() {
            match event {
                AgentEvent::Combat(e) => observer.on_combat(&e),
                AgentEvent::Behavior(e) => observer.on_behavior(&e),
            }
        }

        observer.on_tick_end(now, self.store.living_count());
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.store);
        }

        self.store.advance_clock();
        acted
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn world_state(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.store)
    }

    /// Cheapest action sequence from `start` to `goal` using the shared
    /// planner.
    pub fn plan_for(&self, start: &WorldState, goal: &WorldState) -> Plan {
        self.planner.plan(start, goal)
    }

    /// Grid path between two world positions.  Empty when unreachable.
    pub fn find_path(&self, from: Position, to: Position) -> Vec<Position> {
        self.pathfinder.find_path(from, to)
    }

    /// Grid path from agent `id`'s current position to `to`.
    pub fn path_for(&self, id: AgentId, to: Position) -> Vec<Position> {
        self.store.position_of(id).map(|from| self.find_path(from, to)).unwrap_or_default()
    }
}
