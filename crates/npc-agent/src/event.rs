//! Events emitted while agents tick, drained by the population manager.

use npc_core::AgentId;

/// One resolved attack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub attacker: AgentId,
    pub defender: AgentId,
    pub damage:   f32,
    /// Simulated seconds since the start of the run.
    pub at:       f64,
}

/// A named, free-form agent event (status change, death, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorEvent {
    pub agent:   AgentId,
    pub event:   String,
    pub payload: String,
    pub at:      f64,
}

impl BehaviorEvent {
    pub fn new(agent: AgentId, event: &str, payload: impl Into<String>, at: f64) -> Self {
        Self { agent, event: event.to_owned(), payload: payload.into(), at }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Combat(CombatEvent),
    Behavior(BehaviorEvent),
}
