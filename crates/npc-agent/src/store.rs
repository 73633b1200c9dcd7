//! `AgentStore`: every agent, the simulated clock, and the shared world
//! features leaves read (cover points).  It is also the context every brain
//! ticks against.

use std::collections::BTreeMap;

use npc_behavior::{BehaviorResult, Clocked, Status};
use npc_core::{AgentId, BehaviorState, Position, SimClock, SimConfig};
use tracing::debug;

use crate::{Agent, AgentBuilder, AgentEvent, BehaviorEvent, CombatEvent, MemoryEntry, keys};

/// Damage roll multiplier bounds, applied to attack power.
const DAMAGE_ROLL: std::ops::RangeInclusive<f32> = 0.85..=1.15;
/// Fraction of the defender's defense subtracted from each hit.
const DEFENSE_FACTOR: f32 = 0.4;
/// No hit deals less than this.
const MIN_DAMAGE: f32 = 1.0;

pub struct AgentStore {
    agents:          BTreeMap<AgentId, Agent>,
    next_id:         AgentId,
    active:          AgentId,
    clock:           SimClock,
    seed:            u64,
    memory_capacity: usize,
    cover_points:    Vec<Position>,
    events:          Vec<AgentEvent>,
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

impl Clocked for AgentStore {
    fn now_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }
}

impl AgentStore {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            agents:          BTreeMap::new(),
            next_id:         AgentId::FIRST,
            active:          AgentId::INVALID,
            clock:           config.make_clock(),
            seed:            config.seed,
            memory_capacity: config.memory_capacity,
            cover_points:    Vec::new(),
            events:          Vec::new(),
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Build and register a new agent under a freshly allocated id.
    ///
    /// Ids are never reused, so no spawn can collide with a live or
    /// despawned agent.
    pub fn spawn(&mut self, builder: AgentBuilder) -> BehaviorResult<AgentId> {
        let id = self.next_id;
        let agent = builder.build(id, self.seed, self.memory_capacity)?;
        self.next_id = id.next();
        debug!(%id, name = %agent.name, kind = %agent.kind, personality = %agent.personality, "spawned agent");
        self.agents.insert(id, agent);
        Ok(id)
    }

    /// Remove an agent.  Other agents' references to it now resolve to
    /// nothing.
    pub fn despawn(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// `true` iff `id` exists and has health left.
    pub fn is_living(&self, id: AgentId) -> bool {
        self.get(id).is_some_and(Agent::is_alive)
    }

    pub fn position_of(&self, id: AgentId) -> Option<Position> {
        self.get(id).map(|a| a.position)
    }

    /// Agent ids in ascending order.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn living_count(&self) -> usize {
        self.agents.values().filter(|a| a.is_alive()).count()
    }

    // ── Clock and world ───────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn advance_clock(&mut self) {
        self.clock.advance();
    }

    pub fn add_cover_point(&mut self, p: Position) {
        self.cover_points.push(p);
    }

    pub fn cover_points(&self) -> &[Position] {
        &self.cover_points
    }

    /// Take every event emitted since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<AgentEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// The agent whose brain is currently ticking.
    pub fn active_id(&self) -> AgentId {
        self.active
    }

    pub fn active(&self) -> Option<&Agent> {
        self.agents.get(&self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Agent> {
        self.agents.get_mut(&self.active)
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, id: AgentId) {
        self.active = id;
    }

    /// Tick one agent's brain.  Returns `None` without doing anything when
    /// the agent is unknown or dead.
    pub fn tick_agent(&mut self, id: AgentId) -> Option<Status> {
        let agent = self.agents.get_mut(&id)?;
        if !agent.is_alive() {
            return None;
        }
        let mut brain = agent.brain.take()?;

        let outer = std::mem::replace(&mut self.active, id);
        let status = brain.tick(self);
        self.active = outer;

        if let Some(agent) = self.agents.get_mut(&id) {
            agent.brain = Some(brain);
        }
        Some(status)
    }

    // ── Relations ─────────────────────────────────────────────────────────

    /// Each listed agent's allies become exactly the other listed agents.
    /// Unknown ids are skipped.
    pub fn form_group(&mut self, ids: &[AgentId]) {
        let members: Vec<AgentId> = ids.iter().copied().filter(|id| self.contains(*id)).collect();
        for &id in &members {
            let others: Vec<AgentId> = members.iter().copied().filter(|&o| o != id).collect();
            if let Some(agent) = self.get_mut(id) {
                agent.allies = others;
            }
        }
    }

    /// Mutual hostility between every pair across `a` and `b`.  Existing
    /// relations and self-pairs are skipped.
    pub fn add_enemies(&mut self, a: &[AgentId], b: &[AgentId]) {
        for &x in a {
            for &y in b {
                if x == y || !self.contains(x) || !self.contains(y) {
                    continue;
                }
                if let Some(agent) = self.get_mut(x) {
                    agent.add_enemy(y);
                }
                if let Some(agent) = self.get_mut(y) {
                    agent.add_enemy(x);
                }
            }
        }
    }

    // ── Actions used by leaves and state-machine brains ───────────────────

    /// Set a status tag, emitting a `state` event when it changes.
    pub fn set_state(&mut self, id: AgentId, state: BehaviorState) {
        let at = self.now_secs();
        let Some(agent) = self.agents.get_mut(&id) else {
            return;
        };
        if agent.state == state {
            return;
        }
        let payload = format!("{}->{}", agent.state, state);
        agent.state = state;
        self.events.push(AgentEvent::Behavior(BehaviorEvent::new(id, "state", payload, at)));
    }

    /// Nearest living enemy of `id` within its vision range.
    pub fn nearest_visible_enemy(&self, id: AgentId) -> Option<(AgentId, Position)> {
        let me = self.get(id)?;
        me.enemies
            .iter()
            .filter_map(|&e| self.get(e))
            .filter(|e| e.is_alive())
            .map(|e| (e.id, e.position, me.position.distance(e.position)))
            .filter(|&(_, _, d)| d <= me.stats.vision_range)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(e, pos, _)| (e, pos))
    }

    /// Step `id` toward `target` at `mult` times its speed.
    pub fn move_toward(&mut self, id: AgentId, target: Position, mult: f32) {
        let dt = self.clock.tick_duration_secs as f32;
        if let Some(agent) = self.get_mut(id) {
            let step = agent.stats.speed * mult * dt;
            agent.position = agent.position.step_toward(target, step);
        }
    }

    /// Step `id` directly away from `threat` at `mult` times its speed.
    pub fn move_away(&mut self, id: AgentId, threat: Position, mult: f32) {
        let dt = self.clock.tick_duration_secs as f32;
        if let Some(agent) = self.get_mut(id) {
            let step = agent.stats.speed * mult * dt;
            agent.position = agent.position.step_away(threat, step);
        }
    }

    /// Resolve one attack.  Returns the damage dealt, or `None` when either
    /// side is missing or dead.
    ///
    /// Damage is `attack_power × U(0.85, 1.15) − 0.4 × defense`, never below
    /// 1.  The roll comes from the attacker's own RNG.
    pub fn attack(&mut self, attacker: AgentId, defender: AgentId) -> Option<f32> {
        if attacker == defender || !self.is_living(defender) {
            return None;
        }
        let defense = self.get(defender)?.stats.defense;
        let at = self.now_secs();

        let me = self.get_mut(attacker).filter(|a| a.is_alive())?;
        let roll = me.rng.gen_range(DAMAGE_ROLL);
        let damage = (me.stats.attack_power * roll - defense * DEFENSE_FACTOR).max(MIN_DAMAGE);
        me.remember(MemoryEntry { target: defender, damage, at });
        let from = me.position;

        let target = self.get_mut(defender)?;
        target.receive_damage(damage, Some((attacker, from)));
        let killed = !target.is_alive();

        self.events.push(AgentEvent::Combat(CombatEvent { attacker, defender, damage, at }));
        if killed {
            debug!(%attacker, %defender, "agent killed");
            self.events.push(AgentEvent::Behavior(BehaviorEvent::new(
                defender,
                "death",
                attacker.0.to_string(),
                at,
            )));
        }
        Some(damage)
    }

    /// Mark every ally of `id` within twice its hearing range as alerted and
    /// make `enemy` (if any) their enemy too.  Returns how many allies heard.
    pub fn alert_allies(&mut self, id: AgentId, enemy: Option<AgentId>) -> usize {
        let Some(me) = self.get(id) else {
            return 0;
        };
        let radius = me.stats.hear_range * 2.0;
        let origin = me.position;
        let allies = me.allies.clone();

        let mut heard = 0;
        for ally in allies {
            let Some(a) = self.get_mut(ally) else {
                continue;
            };
            if !a.is_alive() || origin.distance(a.position) > radius {
                continue;
            }
            a.blackboard.set(keys::ALERTED, true);
            if let Some(e) = enemy {
                a.add_enemy(e);
            }
            heard += 1;
        }
        heard
    }
}
