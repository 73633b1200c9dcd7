//! The structured NPC record a generation request produces.

use npc_agent::SpawnOverrides;
use npc_core::Personality;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{LlmError, LlmResult};

/// A generated NPC design.  Only used to pre-populate spawn overrides.
///
/// Every field is optional on the wire; missing ones take the values of
/// [`NpcBlueprint::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcBlueprint {
    pub name:           String,
    /// Template name to spawn from.
    #[serde(rename = "type")]
    pub kind:           String,
    pub personality:    String,
    pub health:         Option<f32>,
    pub attack_power:   Option<f32>,
    pub defense:        Option<f32>,
    pub speed:          Option<f32>,
    pub vision_range:   Option<f32>,
    pub behavior_notes: Option<String>,
    pub patrol_radius:  Option<f32>,
}

impl Default for NpcBlueprint {
    /// The safe fallback: a neutral 100-HP guard called "NPC".
    fn default() -> Self {
        Self {
            name:           "NPC".into(),
            kind:           "guard".into(),
            personality:    "neutral".into(),
            health:         Some(100.0),
            attack_power:   None,
            defense:        None,
            speed:          None,
            vision_range:   None,
            behavior_notes: None,
            patrol_radius:  None,
        }
    }
}

impl NpcBlueprint {
    /// The personality, if it names one.
    pub fn personality(&self) -> Option<Personality> {
        self.personality.to_ascii_lowercase().parse().ok()
    }

    /// Spawn overrides carrying every field the blueprint sets.  An
    /// unrecognised personality is dropped so the template's applies.
    pub fn overrides(&self) -> SpawnOverrides {
        let personality = self.personality();
        if personality.is_none() {
            warn!(personality = %self.personality, "ignoring unknown personality in blueprint");
        }
        SpawnOverrides {
            personality,
            health: self.health,
            attack_power: self.attack_power,
            defense: self.defense,
            speed: self.speed,
            vision_range: self.vision_range,
            patrol_radius: self.patrol_radius,
            ..SpawnOverrides::default()
        }
    }
}

/// Parse a blueprint out of free model text, tolerating prose around the
/// JSON object.
pub fn parse_blueprint(response: &str) -> LlmResult<NpcBlueprint> {
    Ok(serde_json::from_str(extract_json(response)?)?)
}

/// The outermost `{ ... }` span of `response`.
fn extract_json(response: &str) -> LlmResult<&str> {
    let start = response.find('{').ok_or(LlmError::NoJson)?;
    let end = response.rfind('}').ok_or(LlmError::NoJson)?;
    if end < start {
        return Err(LlmError::NoJson);
    }
    Ok(&response[start..=end])
}
