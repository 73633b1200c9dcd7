//! Read-only snapshots of the population for external tooling.

use std::collections::BTreeMap;

use npc_agent::{Agent, AgentStore};
use npc_core::{AgentId, BehaviorState, Personality, Position};

/// One agent as seen from outside the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSummary {
    #[cfg_attr(feature = "serde", serde(rename = "npc_id"))]
    pub id:          AgentId,
    pub name:        String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind:        String,
    pub state:       BehaviorState,
    pub personality: Personality,
    #[cfg_attr(feature = "serde", serde(rename = "pos"))]
    pub position:    Position,
    /// Rounded to one decimal place.
    #[cfg_attr(feature = "serde", serde(rename = "hp"))]
    pub health:      f32,
    #[cfg_attr(feature = "serde", serde(rename = "max_hp"))]
    pub max_health:  f32,
}

impl From<&Agent> for AgentSummary {
    fn from(a: &Agent) -> Self {
        Self {
            id:          a.id,
            name:        a.name.clone(),
            kind:        a.kind.clone(),
            state:       a.state,
            personality: a.personality,
            position:    a.position,
            health:      (a.stats.health * 10.0).round() / 10.0,
            max_health:  a.stats.max_health,
        }
    }
}

/// Population counts plus a summary of every agent, dead ones included.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub total:    usize,
    pub alive:    usize,
    /// Agent count for every status tag, zero counts included.
    pub by_state: BTreeMap<String, usize>,
    /// Ascending id order.
    pub npcs:     Vec<AgentSummary>,
}

impl WorldSnapshot {
    pub fn capture(store: &AgentStore) -> Self {
        let mut by_state: BTreeMap<String, usize> =
            BehaviorState::ALL.iter().map(|s| (s.as_str().to_owned(), 0)).collect();
        for agent in store.iter() {
            *by_state.entry(agent.state.as_str().to_owned()).or_default() += 1;
        }
        Self {
            total: store.len(),
            alive: store.living_count(),
            by_state,
            npcs: store.iter().map(AgentSummary::from).collect(),
        }
    }

    /// How many agents currently carry `state`.
    pub fn count(&self, state: BehaviorState) -> usize {
        self.by_state.get(state.as_str()).copied().unwrap_or(0)
    }
}
