//! `npc-agent`: agents and the store they tick against.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`agent`]    | `Agent`, `MemoryEntry`, blackboard key constants             |
//! | [`store`]    | `AgentStore`: owns every agent, is the tick context          |
//! | [`leaves`]   | `NpcLeaf`: perception, combat and movement leaves            |
//! | [`brain`]    | `Brain`, `BrainKind`, `build_tree`, `GuardBrain`             |
//! | [`builder`]  | `AgentBuilder`: template + overrides → `Agent`               |
//! | [`template`] | `Template`, the built-in catalog, `SpawnOverrides`           |
//! | [`event`]    | `AgentEvent`, `CombatEvent`, `BehaviorEvent`                 |
//!
//! # Ticking
//!
//! Leaves need to read and write agents other than the one being ticked (an
//! attack damages its target, an alert reaches allies).  The store is
//! therefore the tick context: [`AgentStore::tick_agent`] takes the agent's
//! brain out, marks the agent active, ticks the brain against the whole
//! store, and puts the brain back.  Agents refer to each other only by
//! [`AgentId`](npc_core::AgentId); a reference to a despawned agent simply
//! resolves to nothing.

pub mod agent;
pub mod brain;
pub mod builder;
pub mod event;
pub mod leaves;
pub mod store;
pub mod template;


pub use agent::{Agent, MemoryEntry, keys};
pub use brain::{Brain, BrainKind, GuardBrain, build_tree, guard_brain};
pub use builder::AgentBuilder;
pub use event::{AgentEvent, BehaviorEvent, CombatEvent};
pub use leaves::NpcLeaf;
pub use store::AgentStore;
pub use template::{DEFAULT_TEMPLATE, SpawnOverrides, Template};
