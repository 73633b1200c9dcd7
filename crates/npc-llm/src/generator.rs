//! Description → blueprint generation with a safe fallback.

use tracing::{debug, warn};

use crate::{Completion, LlmResult, NpcBlueprint, parse_blueprint};

const SYSTEM_PROMPT: &str = "You design NPCs for a game. Reply with a single JSON object and nothing else.";

/// Builds the user prompt for `description`.
pub fn blueprint_prompt(description: &str) -> String {
    format!(
        r#"Design a game NPC: {description}
Return ONLY JSON:
{{"name":"str","type":"guard|warrior|archer|mage|boss|merchant|villager",
"personality":"aggressive|defensive|neutral|cowardly|brave|cunning|friendly",
"health":100,"attack_power":25,"defense":10,"speed":5.0,"vision_range":20.0,
"behavior_notes":"str","patrol_radius":10}}"#
    )
}

/// Turns free-text descriptions into [`NpcBlueprint`]s.
pub struct BlueprintGenerator<C> {
    client: C,
}

impl<C: Completion> BlueprintGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Generate a blueprint, surfacing any failure.
    pub async fn try_generate(&self, description: &str) -> LlmResult<NpcBlueprint> {
        let text = self.client.complete(SYSTEM_PROMPT, &blueprint_prompt(description)).await?;
        let blueprint = parse_blueprint(&text)?;
        debug!(name = %blueprint.name, kind = %blueprint.kind, "generated blueprint");
        Ok(blueprint)
    }

    /// Generate a blueprint; any failure yields [`NpcBlueprint::default`].
    pub async fn generate(&self, description: &str) -> NpcBlueprint {
        match self.try_generate(description).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "blueprint generation failed; using default");
                NpcBlueprint::default()
            }
        }
    }
}
