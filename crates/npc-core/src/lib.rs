//! `npc-core`: foundational types for the NPC decision engine.
//!
//! This crate is a dependency of every other `npc-*` crate.  It intentionally
//! has no `npc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `Position`, Euclidean and planar distance             |
//! | [`stats`]       | `AgentStats`, `Personality`, `BehaviorState`          |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `NpcError`, `NpcResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `npc-output` and `npc-llm`.                    |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod stats;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NpcError, NpcResult};
pub use geo::Position;
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use stats::{AgentStats, BehaviorState, Personality};
pub use time::{SimClock, SimConfig, Tick};
