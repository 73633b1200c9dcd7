//! Planner actions and the standard combat catalog.

use crate::{Fact, WorldState};

/// A named action with preconditions, effects and a non-negative cost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoapAction {
    pub name:          String,
    pub preconditions: WorldState,
    pub effects:       WorldState,
    pub cost:          f64,
}

impl GoapAction {
    /// A new action with no preconditions or effects.  Negative costs are
    /// clamped to zero.
    pub fn new(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name:          name.into(),
            preconditions: WorldState::new(),
            effects:       WorldState::new(),
            cost:          cost.max(0.0),
        }
    }

    pub fn requires(mut self, key: &str, value: impl Into<Fact>) -> Self {
        self.preconditions.set(key, value);
        self
    }

    pub fn produces(mut self, key: &str, value: impl Into<Fact>) -> Self {
        self.effects.set(key, value);
        self
    }

    /// Every precondition key is present in `state` with the required value.
    pub fn applicable(&self, state: &WorldState) -> bool {
        state.satisfies(&self.preconditions)
    }

    /// `state` with this action's effects applied.
    pub fn apply(&self, state: &WorldState) -> WorldState {
        state.merged(&self.effects)
    }
}

/// The standard combat catalog, in planning order.
///
/// | Action        | Requires                                 | Produces              | Cost |
/// |---------------|------------------------------------------|-----------------------|------|
/// | `MoveToEnemy` | `has_weapon`, `!in_range`                | `in_range`            | 1.0  |
/// | `AttackEnemy` | `in_range`, `enemy_alive`                | `!enemy_alive`        | 1.0  |
/// | `Reload`      | `ammo = 0`                               | `ammo = 30`           | 2.0  |
/// | `Flee`        | `health_low`                             | `is_safe`             | 0.5  |
/// | `HealSelf`    | `has_potion`, `health_low`               | `!health_low`         | 1.5  |
/// | `TakeCover`   | `under_fire`                             | `in_cover`            | 1.0  |
/// | `AlertAllies` | `enemy_alive`, `!allies_alerted`         | `allies_alerted`      | 0.5  |
/// | `UseAbility`  | `ability_ready`, `in_range`              | `!enemy_alive`        | 0.8  |
pub fn default_actions() -> Vec<GoapAction> {
    vec![
        GoapAction::new("MoveToEnemy", 1.0)
            .requires("has_weapon", true)
            .requires("in_range", false)
            .produces("in_range", true),
        GoapAction::new("AttackEnemy", 1.0)
            .requires("in_range", true)
            .requires("enemy_alive", true)
            .produces("enemy_alive", false),
        GoapAction::new("Reload", 2.0)
            .requires("ammo", 0)
            .produces("ammo", 30),
        GoapAction::new("Flee", 0.5)
            .requires("health_low", true)
            .produces("is_safe", true),
        GoapAction::new("HealSelf", 1.5)
            .requires("has_potion", true)
            .requires("health_low", true)
            .produces("health_low", false),
        GoapAction::new("TakeCover", 1.0)
            .requires("under_fire", true)
            .produces("in_cover", true),
        GoapAction::new("AlertAllies", 0.5)
            .requires("enemy_alive", true)
            .requires("allies_alerted", false)
            .produces("allies_alerted", true),
        GoapAction::new("UseAbility", 0.8)
            .requires("ability_ready", true)
            .requires("in_range", true)
            .produces("enemy_alive", false),
    ]
}
