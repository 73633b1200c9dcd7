//! The `Agent` record.

use std::collections::VecDeque;

use npc_behavior::Blackboard;
use npc_core::{AgentId, AgentRng, AgentStats, BehaviorState, Personality, Position};

use crate::Brain;

/// Blackboard keys shared by the leaves.
pub mod keys {
    /// `Agent`: the enemy currently being engaged.
    pub const ENEMY: &str = "enemy";
    /// `Position`: where the enemy was last seen.
    pub const LAST_ENEMY_POS: &str = "last_enemy_pos";
    /// `Flag`: an enemy is known to be around.
    pub const ALERTED: &str = "alerted";
    /// `Flag`: the agent was hit and has not reached cover since.
    pub const UNDER_FIRE: &str = "under_fire";
    /// `Position`: the cover point being moved to.
    pub const COVER: &str = "cover";
    /// `Number`: simulated time of the last attack (state-machine brain).
    pub const LAST_ATTACK_AT: &str = "last_attack_at";
}

/// One entry of an agent's attack memory.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryEntry {
    pub target: AgentId,
    pub damage: f32,
    pub at:     f64,
}

/// An NPC.
///
/// Ally and enemy lists hold ids, not references: membership only.  Entries
/// may point at dead or despawned agents and are filtered at use.
pub struct Agent {
    pub id:          AgentId,
    pub name:        String,
    /// Template the agent was spawned from.
    pub kind:        String,
    pub position:    Position,
    pub personality: Personality,
    pub stats:       AgentStats,
    pub state:       BehaviorState,

    pub patrol:       Vec<Position>,
    pub patrol_index: usize,

    pub allies:  Vec<AgentId>,
    pub enemies: Vec<AgentId>,

    pub blackboard: Blackboard,
    pub rng:        AgentRng,

    memory:          VecDeque<MemoryEntry>,
    memory_capacity: usize,

    /// `None` only while the brain is being ticked.
    pub(crate) brain: Option<Brain>,
}

impl Agent {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id:              AgentId,
        name:            String,
        kind:            String,
        position:        Position,
        personality:     Personality,
        stats:           AgentStats,
        rng:             AgentRng,
        memory_capacity: usize,
        brain:           Brain,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            position,
            personality,
            stats,
            state: BehaviorState::Idle,
            patrol: Vec::new(),
            patrol_index: 0,
            allies: Vec::new(),
            enemies: Vec::new(),
            blackboard: Blackboard::new(),
            rng,
            memory: VecDeque::with_capacity(memory_capacity.min(64)),
            memory_capacity,
            brain: Some(brain),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn brain(&self) -> Option<&Brain> {
        self.brain.as_ref()
    }

    /// Replace the patrol loop and restart it from the first waypoint.
    pub fn set_patrol(&mut self, points: Vec<Position>) {
        self.patrol = points;
        self.patrol_index = 0;
    }

    /// Add `enemy` unless already present or `self`.
    pub fn add_enemy(&mut self, enemy: AgentId) -> bool {
        if enemy == self.id || self.enemies.contains(&enemy) {
            return false;
        }
        self.enemies.push(enemy);
        true
    }

    /// Append to the memory log, evicting the oldest entry at capacity.
    pub fn remember(&mut self, entry: MemoryEntry) {
        if self.memory_capacity == 0 {
            return;
        }
        if self.memory.len() == self.memory_capacity {
            self.memory.pop_front();
        }
        self.memory.push_back(entry);
    }

    /// Memory entries, oldest first.
    pub fn memory(&self) -> impl ExactSizeIterator<Item = &MemoryEntry> {
        self.memory.iter()
    }

    /// Apply `amount` damage, optionally attributed to `attacker` standing at
    /// `attacker_pos`.  Returns the health actually removed.
    ///
    /// The attacker becomes an enemy and the blackboard records it, its
    /// position, and the `alerted`/`under_fire` flags.  Lethal damage sets the
    /// status tag to `Dead`.  Damage to an already-dead agent is ignored.
    pub fn receive_damage(&mut self, amount: f32, attacker: Option<(AgentId, Position)>) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let dealt = self.stats.apply_damage(amount);
        if let Some((id, pos)) = attacker {
            self.add_enemy(id);
            self.blackboard.set(keys::ENEMY, id);
            self.blackboard.set(keys::LAST_ENEMY_POS, pos);
            self.blackboard.set(keys::ALERTED, true);
            self.blackboard.set(keys::UNDER_FIRE, true);
        }
        if !self.is_alive() {
            self.state = BehaviorState::Dead;
        }
        dealt
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("personality", &self.personality)
            .field("state", &self.state)
            .field("health", &self.stats.health)
            .finish_non_exhaustive()
    }
}
