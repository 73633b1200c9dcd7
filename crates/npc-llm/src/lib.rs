//! `npc-llm`: NPC blueprints from free-text descriptions.
//!
//! A remote chat-completion endpoint is asked for a JSON record
//! `{name, type, personality, health, attack_power, defense, speed,
//! vision_range, behavior_notes, patrol_radius}`.  The result only seeds
//! spawn overrides; it never touches a running simulation, and every failure
//! (network, API, malformed JSON) degrades to [`NpcBlueprint::default`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let generator = BlueprintGenerator::new(LlmClient::from_env()?);
//! let bp = generator.generate("a paranoid lighthouse keeper").await;
//! sim.spawn(&bp.kind, &bp.name, Position::ORIGIN, bp.overrides())?;
//! ```

pub mod blueprint;
pub mod client;
pub mod error;
pub mod generator;


pub use blueprint::{NpcBlueprint, parse_blueprint};
pub use client::{ApiFormat, Completion, DEFAULT_API_URL, DEFAULT_MODEL, LlmClient};
pub use error::{LlmError, LlmResult};
pub use generator::{BlueprintGenerator, blueprint_prompt};
