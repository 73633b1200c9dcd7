//! Perception, combat and movement leaves.
//!
//! Every leaf acts on the store's active agent.  A missing blackboard entry
//! or a vanished target resolves to `Failure`; no leaf panics or errors.

use npc_behavior::{Leaf, Status};
use npc_core::BehaviorState;

use crate::{AgentStore, keys};

/// Patrol moves at this fraction of full speed.
pub const PATROL_SPEED: f32 = 0.6;
/// Search moves at this fraction of full speed.
pub const SEARCH_SPEED: f32 = 0.7;
/// Fleeing moves at this multiple of full speed.
pub const FLEE_SPEED: f32 = 1.3;
/// A patrol waypoint is reached within this horizontal distance.
pub const WAYPOINT_RADIUS: f32 = 1.0;
/// A search ends within this horizontal distance of the last known enemy position.
pub const SEARCH_RADIUS: f32 = 1.5;
/// A cover point is reached within this distance.
pub const COVER_RADIUS: f32 = 1.0;

/// Every named leaf an NPC tree is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NpcLeaf {
    EnemyVisible,
    InAttackRange,
    /// Health fraction at or below the threshold.
    HealthBelow(f32),
    HasPatrol,
    IsAlerted,
    MoveToEnemy,
    Attack,
    Flee,
    TakeCover,
    Patrol,
    SearchLastPosition,
    AlertAllies,
    Idle,
}

impl Leaf<AgentStore> for NpcLeaf {
    fn name(&self) -> &str {
        match self {
            NpcLeaf::EnemyVisible       => "enemy_visible",
            NpcLeaf::InAttackRange      => "in_attack_range",
            NpcLeaf::HealthBelow(_)     => "health_below",
            NpcLeaf::HasPatrol          => "has_patrol",
            NpcLeaf::IsAlerted          => "is_alerted",
            NpcLeaf::MoveToEnemy        => "move_to_enemy",
            NpcLeaf::Attack             => "attack",
            NpcLeaf::Flee               => "flee",
            NpcLeaf::TakeCover          => "take_cover",
            NpcLeaf::Patrol             => "patrol",
            NpcLeaf::SearchLastPosition => "search_last_position",
            NpcLeaf::AlertAllies        => "alert_allies",
            NpcLeaf::Idle               => "idle",
        }
    }

    fn tick(&mut self, store: &mut AgentStore) -> Status {
        match *self {
            NpcLeaf::EnemyVisible       => enemy_visible(store),
            NpcLeaf::InAttackRange      => Status::from_bool(in_attack_range(store)),
            NpcLeaf::HealthBelow(pct)   => health_below(store, pct),
            NpcLeaf::HasPatrol          => has_patrol(store),
            NpcLeaf::IsAlerted          => is_alerted(store),
            NpcLeaf::MoveToEnemy        => move_to_enemy(store),
            NpcLeaf::Attack             => attack(store),
            NpcLeaf::Flee               => flee(store),
            NpcLeaf::TakeCover          => take_cover(store),
            NpcLeaf::Patrol             => patrol(store),
            NpcLeaf::SearchLastPosition => search_last_position(store),
            NpcLeaf::AlertAllies        => alert_allies(store),
            NpcLeaf::Idle               => idle(store),
        }
    }
}

// ── Conditions ────────────────────────────────────────────────────────────────

pub(crate) fn enemy_visible(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some((enemy, pos)) = store.nearest_visible_enemy(id) else {
        return Status::Failure;
    };
    if let Some(me) = store.active_mut() {
        me.blackboard.set(keys::ENEMY, enemy);
        me.blackboard.set(keys::LAST_ENEMY_POS, pos);
    }
    Status::Success
}

/// A remembered enemy exists and is within attack range.
pub(crate) fn in_attack_range(store: &AgentStore) -> bool {
    let Some(me) = store.active() else {
        return false;
    };
    me.blackboard
        .agent(keys::ENEMY)
        .and_then(|e| store.position_of(e))
        .is_some_and(|p| me.position.distance(p) <= me.stats.attack_range)
}

fn health_below(store: &AgentStore, pct: f32) -> Status {
    Status::from_bool(store.active().is_some_and(|a| a.stats.health_fraction() <= pct))
}

fn has_patrol(store: &AgentStore) -> Status {
    Status::from_bool(store.active().is_some_and(|a| !a.patrol.is_empty()))
}

fn is_alerted(store: &AgentStore) -> Status {
    Status::from_bool(store.active().is_some_and(|a| a.blackboard.flag(keys::ALERTED)))
}

// ── Actions ───────────────────────────────────────────────────────────────────

pub(crate) fn move_to_enemy(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some(target) = store
        .active()
        .and_then(|me| me.blackboard.agent(keys::ENEMY))
        .and_then(|e| store.position_of(e))
    else {
        return Status::Failure;
    };
    if in_attack_range(store) {
        return Status::Success;
    }
    store.move_toward(id, target, 1.0);
    store.set_state(id, BehaviorState::Chase);
    Status::Running
}

pub(crate) fn attack(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some(enemy) = store.active().and_then(|me| me.blackboard.agent(keys::ENEMY)) else {
        return Status::Failure;
    };
    // A swing at a dead or vanished target still completes the action.
    if store.attack(id, enemy).is_some() {
        store.set_state(id, BehaviorState::Attack);
    }
    Status::Success
}

pub(crate) fn flee(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some(threat) = store
        .active()
        .and_then(|me| me.blackboard.agent(keys::ENEMY))
        .and_then(|e| store.position_of(e))
    else {
        return Status::Failure;
    };
    store.move_away(id, threat, FLEE_SPEED);
    store.set_state(id, BehaviorState::Flee);
    Status::Running
}

/// Head for a cover point while under fire.
///
/// The first call picks a random registered cover point within vision range
/// and remembers it; later calls keep moving to the same point.  Reaching it
/// clears `under_fire`.
fn take_cover(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some(me) = store.active() else {
        return Status::Failure;
    };
    if !me.blackboard.flag(keys::UNDER_FIRE) {
        return Status::Failure;
    }

    let cover = match me.blackboard.position(keys::COVER) {
        Some(c) => c,
        None => {
            let (origin, range) = (me.position, me.stats.vision_range);
            let candidates: Vec<_> = store
                .cover_points()
                .iter()
                .copied()
                .filter(|c| origin.distance(*c) <= range)
                .collect();
            let Some(me) = store.active_mut() else {
                return Status::Failure;
            };
            let Some(&chosen) = me.rng.choose(&candidates) else {
                return Status::Failure;
            };
            me.blackboard.set(keys::COVER, chosen);
            chosen
        }
    };

    store.move_toward(id, cover, 1.0);
    store.set_state(id, BehaviorState::Flee);
    let Some(me) = store.active_mut() else {
        return Status::Failure;
    };
    if me.position.planar_distance(cover) <= COVER_RADIUS {
        me.blackboard.remove(keys::COVER);
        me.blackboard.set(keys::UNDER_FIRE, false);
        return Status::Success;
    }
    Status::Running
}

pub(crate) fn patrol(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let Some(me) = store.active_mut() else {
        return Status::Failure;
    };
    if me.patrol.is_empty() {
        return Status::Failure;
    }
    let waypoint = me.patrol[me.patrol_index % me.patrol.len()];
    if me.position.planar_distance(waypoint) < WAYPOINT_RADIUS {
        me.patrol_index = (me.patrol_index + 1) % me.patrol.len();
    } else {
        store.move_toward(id, waypoint, PATROL_SPEED);
    }
    store.set_state(id, BehaviorState::Patrol);
    Status::Running
}

pub(crate) fn search_last_position(store: &mut AgentStore) -> Status {
    approach_last_position(store, BehaviorState::Search)
}

/// Walk to the last known enemy position under status `tag`; on arrival
/// forget it and stand down.
pub(crate) fn approach_last_position(store: &mut AgentStore, tag: BehaviorState) -> Status {
    let id = store.active_id();
    let Some(last) = store.active().and_then(|me| me.blackboard.position(keys::LAST_ENEMY_POS)) else {
        return Status::Failure;
    };
    store.move_toward(id, last, SEARCH_SPEED);
    store.set_state(id, tag);
    let Some(me) = store.active_mut() else {
        return Status::Failure;
    };
    if me.position.planar_distance(last) < SEARCH_RADIUS {
        me.blackboard.remove(keys::LAST_ENEMY_POS);
        me.blackboard.remove(keys::ALERTED);
        return Status::Success;
    }
    Status::Running
}

fn alert_allies(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    let enemy = store.active().and_then(|me| me.blackboard.agent(keys::ENEMY));
    store.alert_allies(id, enemy);
    if let Some(me) = store.active_mut() {
        me.blackboard.set(keys::ALERTED, true);
    }
    Status::Success
}

pub(crate) fn idle(store: &mut AgentStore) -> Status {
    let id = store.active_id();
    store.set_state(id, BehaviorState::Idle);
    Status::Success
}
