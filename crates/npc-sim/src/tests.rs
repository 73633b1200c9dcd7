//! Integration tests for npc-sim.

use npc_agent::{BehaviorEvent, CombatEvent, SpawnOverrides};
use npc_core::{AgentId, BehaviorState, Position, SimConfig, Tick};

use crate::{NoopObserver, SimBuilder, SimObserver, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig { total_ticks, ..SimConfig::default() }
}

fn at(x: f32, z: f32) -> Position {
    Position::new(x, 0.0, z)
}

fn sim() -> Simulation {
    Simulation::new(test_config(60)).unwrap()
}

fn spawn(sim: &mut Simulation, template: &str, name: &str, pos: Position) -> AgentId {
    sim.spawn(template, name, pos, SpawnOverrides::default()).unwrap()
}

/// Observer that records everything it is told.
#[derive(Default)]
struct Recorder {
    starts:    usize,
    ends:      Vec<(Tick, usize)>,
    combat:    Vec<CombatEvent>,
    behavior:  Vec<BehaviorEvent>,
    snapshots: Vec<Tick>,
    ended_at:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _t: Tick) { self.starts += 1; }
    fn on_combat(&mut self, e: &CombatEvent) { self.combat.push(*e); }
    fn on_behavior(&mut self, e: &BehaviorEvent) { self.behavior.push(e.clone()); }
    fn on_tick_end(&mut self, t: Tick, alive: usize) { self.ends.push((t, alive)); }
    fn on_snapshot(&mut self, t: Tick, _agents: &npc_agent::AgentStore) { self.snapshots.push(t); }
    fn on_sim_end(&mut self, t: Tick) { self.ended_at = Some(t); }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert!(sim.store.is_empty());
        assert_eq!(sim.planner.actions().len(), 8);
        assert_eq!(sim.planner.max_depth(), 10);
        assert_eq!(sim.pathfinder.width(), 100);
    }

    #[test]
    fn zero_tick_duration_rejected() {
        let config = SimConfig { tick_duration_secs: 0.0, ..SimConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn empty_grid_rejected() {
        let config = SimConfig { grid_width: 0, ..SimConfig::default() };
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn plan_depth_from_config() {
        let config = SimConfig { plan_depth: 3, ..SimConfig::default() };
        assert_eq!(Simulation::new(config).unwrap().planner.max_depth(), 3);
    }

    #[test]
    fn obstacles_reach_pathfinder() {
        let sim = SimBuilder::new(SimConfig::default()).obstacle(2, 2).build().unwrap();
        assert!(sim.find_path(at(0.0, 0.0), at(2.0, 2.0)).is_empty());
        assert!(!sim.find_path(at(0.0, 0.0), at(4.0, 4.0)).is_empty());
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use super::*;

    #[test]
    fn spawn_registers_with_fresh_ids() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let b = spawn(&mut sim, "mystery", "B", Position::ORIGIN);
        assert_ne!(a, b);
        assert_eq!(sim.get(b).unwrap().kind, "mystery");
        assert_eq!(sim.get(b).unwrap().stats.max_health, 120.0);
        assert_eq!(sim.get(a).unwrap().name, "A");
    }

    #[test]
    fn form_group_overwrites() {
        let mut sim = sim();
        let ids: Vec<_> = ["A", "B", "C", "D"].iter().map(|n| spawn(&mut sim, "guard", n, Position::ORIGIN)).collect();
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        sim.form_group(&[a, d]);
        sim.form_group(&[a, b, c]);
        assert_eq!(sim.get(a).unwrap().allies, vec![b, c]);
        assert_eq!(sim.get(b).unwrap().allies, vec![a, c]);
        assert_eq!(sim.get(c).unwrap().allies, vec![a, b]);
    }

    #[test]
    fn form_group_skips_unknown() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        sim.form_group(&[a, AgentId(99)]);
        assert!(sim.get(a).unwrap().allies.is_empty());
    }

    #[test]
    fn add_enemies_symmetric_and_deduplicated() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let b = spawn(&mut sim, "warrior", "B", at(30.0, 0.0));
        sim.add_enemies(&[a], &[b]);
        sim.add_enemies(&[a], &[b]);
        sim.add_enemies(&[b], &[a]);
        assert_eq!(sim.get(a).unwrap().enemies, vec![b]);
        assert_eq!(sim.get(b).unwrap().enemies, vec![a]);
    }

    #[test]
    fn spawn_group_scatters_and_allies() {
        let mut sim = sim();
        let ids = sim.spawn_group("villager", 4, at(10.0, 10.0), 2.0, &SpawnOverrides::default()).unwrap();
        assert_eq!(ids.len(), 4);
        for &id in &ids {
            let agent = sim.get(id).unwrap();
            assert_eq!(agent.allies.len(), 3);
            assert!((agent.position.x - 10.0).abs() <= 2.0);
            assert!((agent.position.z - 10.0).abs() <= 2.0);
            assert_eq!(agent.name, format!("villager_{}", id.0));
        }
    }

    #[test]
    fn spawn_group_deterministic() {
        let positions = || {
            let mut sim = sim();
            let ids = sim.spawn_group("guard", 3, Position::ORIGIN, 5.0, &SpawnOverrides::default()).unwrap();
            ids.iter().map(|&id| sim.get(id).unwrap().position).collect::<Vec<_>>()
        };
        assert_eq!(positions(), positions());
    }

    #[test]
    fn despawn_leaves_no_dangling_behavior() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let b = spawn(&mut sim, "warrior", "B", at(1.0, 0.0));
        sim.add_enemies(&[a], &[b]);
        assert!(sim.despawn(b).is_some());
        assert_eq!(sim.tick_all(), 1);
        assert_eq!(sim.get(a).unwrap().state, BehaviorState::Idle);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_to_end_tick() {
        let mut sim = Simulation::new(test_config(10)).unwrap();
        spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert_eq!(sim.current_tick(), Tick(10));
        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends.len(), 10);
        assert_eq!(obs.ended_at, Some(Tick(10)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = sim();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.current_tick(), Tick(5));
        sim.simulate(3);
        assert_eq!(sim.current_tick(), Tick(8));
    }

    #[test]
    fn snapshots_on_interval() {
        let config = SimConfig { output_interval_ticks: 5, ..test_config(12) };
        let mut sim = Simulation::new(config).unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert_eq!(obs.snapshots, vec![Tick(0), Tick(5), Tick(10)]);
    }

    #[test]
    fn dead_agents_are_skipped() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let b = spawn(&mut sim, "guard", "B", at(50.0, 0.0));
        sim.get_mut(b).unwrap().stats.health = 0.0;
        assert_eq!(sim.tick_all(), 1);
        assert_eq!(sim.get(b).unwrap().state, BehaviorState::Idle);
        assert!(sim.get(a).is_some());
    }

    #[test]
    fn killed_mid_tick_does_not_act() {
        let mut sim = sim();
        let boss = spawn(&mut sim, "boss", "Boss", Position::ORIGIN);
        let victim = spawn(&mut sim, "villager", "Victim", at(1.0, 0.0));
        sim.add_enemies(&[boss], &[victim]);

        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs);

        assert_eq!(obs.combat.len(), 1);
        assert_eq!(obs.combat[0].attacker, boss);
        assert!(obs.behavior.iter().any(|e| e.agent == victim && e.event == "death"));
        assert_eq!(obs.ends, vec![(Tick(0), 1)]);
        assert_eq!(sim.get(victim).unwrap().state, BehaviorState::Dead);
        assert!(sim.get(victim).unwrap().memory().next().is_none());
    }

    #[test]
    fn combat_events_forwarded_in_order() {
        let mut sim = sim();
        let g = spawn(&mut sim, "guard", "G", Position::ORIGIN);
        let w = spawn(&mut sim, "warrior", "W", at(1.0, 0.0));
        sim.add_enemies(&[g], &[w]);

        let mut obs = Recorder::default();
        sim.run_ticks(1, &mut obs);
        let pairs: Vec<_> = obs.combat.iter().map(|e| (e.attacker, e.defender)).collect();
        assert_eq!(pairs, vec![(g, w), (w, g)]);
        assert!(obs.combat.iter().all(|e| e.damage >= 1.0 && e.at == 0.0));
    }

    #[test]
    fn same_seed_same_outcome() {
        let outcome = || {
            let mut sim = sim();
            let g = spawn(&mut sim, "guard", "G", Position::ORIGIN);
            let w = spawn(&mut sim, "warrior", "W", at(1.0, 0.0));
            sim.add_enemies(&[g], &[w]);
            sim.simulate(200);
            sim.world_state()
        };
        assert_eq!(outcome(), outcome());
    }
}

// ── World snapshot ────────────────────────────────────────────────────────────

#[cfg(test)]
mod world_tests {
    use super::*;

    #[test]
    fn counts_every_state() {
        let mut sim = sim();
        spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let b = spawn(&mut sim, "guard", "B", at(40.0, 0.0));
        sim.get_mut(b).unwrap().stats.health = 0.0;
        sim.get_mut(b).unwrap().state = BehaviorState::Dead;

        let ws = sim.world_state();
        assert_eq!((ws.total, ws.alive), (2, 1));
        assert_eq!(ws.by_state.len(), BehaviorState::ALL.len());
        assert_eq!(ws.by_state.values().sum::<usize>(), 2);
        assert_eq!(ws.count(BehaviorState::Dead), 1);
        assert_eq!(ws.count(BehaviorState::Idle), 1);
        assert_eq!(ws.count(BehaviorState::Chase), 0);
    }

    #[test]
    fn summary_rounds_health() {
        let mut sim = sim();
        let a = spawn(&mut sim, "archer", "Ranger", at(5.0, 5.0));
        sim.get_mut(a).unwrap().stats.health = 42.46;
        let ws = sim.world_state();
        let s = &ws.npcs[0];
        assert_eq!(s.id, a);
        assert_eq!(s.name, "Ranger");
        assert_eq!(s.kind, "archer");
        assert_eq!(s.position, at(5.0, 5.0));
        assert_eq!(s.health, 42.5);
        assert_eq!(s.max_health, 80.0);
    }

    #[test]
    fn demo_scenario_runs() {
        let mut sim = sim();
        let patrol = vec![at(0.0, 0.0), at(10.0, 0.0), at(10.0, 10.0), at(0.0, 10.0)];
        let g = sim.spawn("guard", "Guard", Position::ORIGIN, SpawnOverrides::default().with_patrol(patrol)).unwrap();
        let a = spawn(&mut sim, "archer", "Archer", at(5.0, 5.0));
        let p = spawn(&mut sim, "warrior", "Player", at(25.0, 25.0));
        sim.form_group(&[g, a]);
        sim.add_enemies(&[g, a], &[p]);
        sim.simulate(30);

        let ws = sim.world_state();
        assert_eq!(ws.total, 3);
        // The archer sees the player (distance ≈ 28.3 < 30) and closes in.
        assert_ne!(ws.npcs[1].state, BehaviorState::Idle);
    }
}

// ── Shared planners ───────────────────────────────────────────────────────────

#[cfg(test)]
mod query_tests {
    use super::*;
    use npc_goap::{Fact, WorldState};

    #[test]
    fn plan_for_kills_enemy() {
        let sim = sim();
        let start = WorldState::new()
            .with("has_weapon", true)
            .with("in_range", false)
            .with("enemy_alive", true);
        let goal = WorldState::new().with("enemy_alive", false);
        let plan = sim.plan_for(&start, &goal);
        assert!(!plan.is_empty());
        assert!(plan.last().unwrap().effects.holds("enemy_alive", Fact::Bool(false)));
    }

    #[test]
    fn path_for_agent() {
        let mut sim = sim();
        let a = spawn(&mut sim, "guard", "A", Position::ORIGIN);
        let path = sim.path_for(a, at(3.0, 0.0));
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&at(3.0, 0.0)));
        assert!(sim.path_for(AgentId(7), at(3.0, 0.0)).is_empty());
    }
}
