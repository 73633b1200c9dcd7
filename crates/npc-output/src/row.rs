//! Plain data row types written by output backends.

use chrono::{DateTime, Utc};
use npc_agent::{Agent, BehaviorEvent, CombatEvent, Template};
use npc_core::{AgentStats, Personality};

use crate::OutputResult;

/// One template definition.  `stats` is the JSON encoding of [`AgentStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow {
    pub id:          String,
    pub name:        String,
    pub personality: String,
    pub stats:       String,
    pub created_at:  String,
}

impl TemplateRow {
    fn build(
        id:          String,
        name:        &str,
        personality: Personality,
        stats:       &AgentStats,
        created_at:  DateTime<Utc>,
    ) -> OutputResult<Self> {
        Ok(Self {
            id,
            name:        name.to_owned(),
            personality: personality.to_string(),
            stats:       serde_json::to_string(stats)?,
            created_at:  created_at.to_rfc3339(),
        })
    }

    /// A catalog template, keyed by its name.
    pub fn from_template(t: &Template, created_at: DateTime<Utc>) -> OutputResult<Self> {
        Self::build(t.name.clone(), &t.name, t.personality, &t.stats, created_at)
    }

    /// The effective template of a spawned agent, keyed by its id.
    pub fn from_agent(a: &Agent, created_at: DateTime<Utc>) -> OutputResult<Self> {
        Self::build(a.id.0.to_string(), &a.name, a.personality, &a.stats, created_at)
    }
}

/// One resolved attack.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatRow {
    pub attacker: String,
    pub defender: String,
    pub damage:   f64,
    pub ts:       String,
}

impl CombatRow {
    pub fn new(e: &CombatEvent, ts: String) -> Self {
        Self {
            attacker: e.attacker.0.to_string(),
            defender: e.defender.0.to_string(),
            damage:   f64::from(e.damage),
            ts,
        }
    }
}

/// One behavior event; `data` carries the event payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorRow {
    pub npc_id: String,
    pub event:  String,
    pub data:   String,
    pub ts:     String,
}

impl BehaviorRow {
    pub fn new(e: &BehaviorEvent, ts: String) -> Self {
        Self {
            npc_id: e.agent.0.to_string(),
            event:  e.event.clone(),
            data:   e.payload.clone(),
            ts,
        }
    }
}
