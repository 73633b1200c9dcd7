//! Fluent construction of an [`Agent`] from a template plus overrides.
//!
//! # Usage
//!
//! ```rust
//! use npc_agent::{AgentBuilder, AgentStore, SpawnOverrides};
//! use npc_core::{Personality, Position};
//!
//! let mut store = AgentStore::default();
//! let id = store
//!     .spawn(
//!         AgentBuilder::new("archer")
//!             .name("Ranger")
//!             .position(Position::new(5.0, 0.0, 5.0))
//!             .overrides(SpawnOverrides { personality: Some(Personality::Brave), ..Default::default() }),
//!     )
//!     .unwrap();
//!
//! let ranger = store.get(id).unwrap();
//! assert_eq!(ranger.kind, "archer");
//! assert_eq!(ranger.personality, Personality::Brave);
//! assert_eq!(ranger.stats.attack_range, 15.0);
//! ```

use npc_behavior::BehaviorResult;
use npc_core::{AgentId, AgentRng, Position};

use crate::{Agent, Brain, SpawnOverrides, Template};

/// Everything needed to create one agent except its id, which the store
/// allocates.
#[derive(Clone, Debug, Default)]
pub struct AgentBuilder {
    template:  String,
    name:      Option<String>,
    position:  Position,
    overrides: SpawnOverrides,
}

impl AgentBuilder {
    /// Start from the template called `template`.  Unknown names fall back
    /// to the default template when the agent is built.
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into(), ..Self::default() }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn overrides(mut self, overrides: SpawnOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve the template, apply overrides, and build the brain.
    ///
    /// Without an explicit name the agent is called `<template>_<id>`.  The
    /// agent's `kind` is the requested template name even when it fell back.
    pub(crate) fn build(self, id: AgentId, seed: u64, memory_capacity: usize) -> BehaviorResult<Agent> {
        let template = Template::resolve(&self.template);
        let personality = self.overrides.personality.unwrap_or(template.personality);

        let mut stats = template.stats;
        self.overrides.apply_to(&mut stats);

        let brain = Brain::new(self.overrides.brain, personality)?;
        let name = self.name.unwrap_or_else(|| format!("{}_{}", self.template, id.0));

        let mut agent = Agent::new(
            id,
            name,
            self.template,
            self.position,
            personality,
            stats,
            AgentRng::new(seed, id),
            memory_capacity,
            brain,
        );
        agent.set_patrol(self.overrides.patrol_for(self.position));
        Ok(agent)
    }
}
