//! The skirmish population: a patrolling guard and an archer against a
//! warrior.

use anyhow::Result;
use npc_agent::SpawnOverrides;
use npc_core::{AgentId, Position};
use npc_goap::WorldState;
use npc_sim::Simulation;

pub struct Skirmish {
    pub guard:  AgentId,
    pub archer: AgentId,
    pub player: AgentId,
}

/// Square patrol loop around the origin.
pub fn guard_patrol() -> Vec<Position> {
    vec![
        Position::new(0.0, 0.0, 0.0),
        Position::new(10.0, 0.0, 0.0),
        Position::new(10.0, 0.0, 10.0),
        Position::new(0.0, 0.0, 10.0),
    ]
}

/// Spawn the three combatants, group the defenders, and set both sides
/// hostile.
pub fn populate(sim: &mut Simulation) -> Result<Skirmish> {
    let guard = sim.spawn(
        "guard",
        "Guard",
        Position::ORIGIN,
        SpawnOverrides::default().with_patrol(guard_patrol()),
    )?;
    let archer = sim.spawn("archer", "Archer", Position::new(5.0, 0.0, 5.0), SpawnOverrides::default())?;
    let player = sim.spawn("warrior", "Player", Position::new(25.0, 0.0, 25.0), SpawnOverrides::default())?;

    sim.form_group(&[guard, archer]);
    sim.add_enemies(&[guard, archer], &[player]);
    Ok(Skirmish { guard, archer, player })
}

/// An armed soldier out of range of a living enemy.
pub fn soldier_start() -> WorldState {
    WorldState::new()
        .with("has_weapon", true)
        .with("in_range", false)
        .with("enemy_alive", true)
        .with("ammo", 10)
        .with("health_low", false)
        .with("under_fire", false)
        .with("allies_alerted", false)
}

pub fn enemy_dead() -> WorldState {
    WorldState::new().with("enemy_alive", false)
}
