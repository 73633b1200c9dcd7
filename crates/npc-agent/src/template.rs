//! Built-in agent templates and per-spawn overrides.

use npc_core::{AgentStats, Personality, Position};
use tracing::warn;

use crate::BrainKind;

/// Template used when a spawn names a template that does not exist.
pub const DEFAULT_TEMPLATE: &str = "guard";

/// A named personality + base-stats pair.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub name:        String,
    pub personality: Personality,
    pub stats:       AgentStats,
}

impl Template {
    fn new(name: &str, personality: Personality, stats: AgentStats) -> Self {
        Self { name: name.to_owned(), personality, stats }
    }

    /// Every built-in template, in catalog order.
    ///
    /// | Name       | Personality | HP  | Atk | Def | Speed | Notes                     |
    /// |------------|-------------|-----|-----|-----|-------|---------------------------|
    /// | `guard`    | neutral     | 120 | 20  | 15  | 4.5   | vision 18                 |
    /// | `warrior`  | aggressive  | 150 | 35  | 20  | 5.0   | aggression 0.9            |
    /// | `archer`   | defensive   | 80  | 30  | 5   | 4.0   | vision 30, range 15       |
    /// | `mage`     | cunning     | 70  | 50  | 5   | 3.5   | range 12, intelligence 0.9|
    /// | `coward`   | cowardly    | 60  | 10  | 5   | 6.0   | bravery 0.1               |
    /// | `boss`     | aggressive  | 500 | 60  | 30  | 4.0   | bravery 1, int 0.8, xp 500|
    /// | `merchant` | friendly    | 80  | 5   | 5   | 3.0   | aggression 0              |
    /// | `villager` | cowardly    | 50  | 3   | 2   | 3.5   | aggression 0, bravery 0.1 |
    pub fn catalog() -> Vec<Template> {
        let base = |hp: f32, atk: f32, def: f32, speed: f32| AgentStats {
            attack_power: atk,
            defense: def,
            speed,
            ..AgentStats::with_health(hp)
        };
        vec![
            Template::new("guard", Personality::Neutral, AgentStats {
                vision_range: 18.0,
                ..base(120.0, 20.0, 15.0, 4.5)
            }),
            Template::new("warrior", Personality::Aggressive, AgentStats {
                aggression: 0.9,
                ..base(150.0, 35.0, 20.0, 5.0)
            }),
            Template::new("archer", Personality::Defensive, AgentStats {
                vision_range: 30.0,
                attack_range: 15.0,
                ..base(80.0, 30.0, 5.0, 4.0)
            }),
            Template::new("mage", Personality::Cunning, AgentStats {
                attack_range: 12.0,
                intelligence: 0.9,
                ..base(70.0, 50.0, 5.0, 3.5)
            }),
            Template::new("coward", Personality::Cowardly, AgentStats {
                bravery: 0.1,
                ..base(60.0, 10.0, 5.0, 6.0)
            }),
            Template::new("boss", Personality::Aggressive, AgentStats {
                bravery: 1.0,
                intelligence: 0.8,
                xp_reward: 500,
                ..base(500.0, 60.0, 30.0, 4.0)
            }),
            Template::new("merchant", Personality::Friendly, AgentStats {
                aggression: 0.0,
                ..base(80.0, 5.0, 5.0, 3.0)
            }),
            Template::new("villager", Personality::Cowardly, AgentStats {
                aggression: 0.0,
                bravery: 0.1,
                ..base(50.0, 3.0, 2.0, 3.5)
            }),
        ]
    }

    /// The built-in template called `name`, if any.
    pub fn lookup(name: &str) -> Option<Template> {
        Self::catalog().into_iter().find(|t| t.name == name)
    }

    /// The template called `name`, or [`DEFAULT_TEMPLATE`] when unknown.
    pub fn resolve(name: &str) -> Template {
        if let Some(t) = Self::lookup(name) {
            return t;
        }
        warn!(template = name, fallback = DEFAULT_TEMPLATE, "unknown template");
        Self::catalog()
            .into_iter()
            .find(|t| t.name == DEFAULT_TEMPLATE)
            .unwrap_or_else(|| Template::new(DEFAULT_TEMPLATE, Personality::Neutral, AgentStats::default()))
    }
}

// ── SpawnOverrides ────────────────────────────────────────────────────────────

/// Per-spawn adjustments applied on top of a template.
///
/// Every `None` keeps the template's value.  A health override sets both
/// current and maximum health.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnOverrides {
    pub personality:  Option<Personality>,
    pub health:       Option<f32>,
    pub attack_power: Option<f32>,
    pub defense:      Option<f32>,
    pub speed:        Option<f32>,
    pub vision_range: Option<f32>,
    pub hear_range:   Option<f32>,
    pub attack_range: Option<f32>,
    /// Explicit patrol loop.  Takes precedence over `patrol_radius`.
    pub patrol:        Vec<Position>,
    /// Square patrol loop of this half-width around the spawn point.
    pub patrol_radius: Option<f32>,
    pub brain:         BrainKind,
}

impl SpawnOverrides {
    pub fn with_patrol(mut self, points: Vec<Position>) -> Self {
        self.patrol = points;
        self
    }

    pub fn with_brain(mut self, brain: BrainKind) -> Self {
        self.brain = brain;
        self
    }

    pub fn with_health(mut self, hp: f32) -> Self {
        self.health = Some(hp);
        self
    }

    /// Write every set field over `stats` and re-establish its invariants.
    /// A health override that is not a positive finite number is ignored.
    pub fn apply_to(&self, stats: &mut AgentStats) {
        if let Some(hp) = self.health.filter(|hp| hp.is_finite() && *hp > 0.0) {
            stats.health = hp;
            stats.max_health = hp;
        }
        let fields = [
            (self.attack_power, &mut stats.attack_power),
            (self.defense, &mut stats.defense),
            (self.speed, &mut stats.speed),
            (self.vision_range, &mut stats.vision_range),
            (self.hear_range, &mut stats.hear_range),
            (self.attack_range, &mut stats.attack_range),
        ];
        for (value, field) in fields {
            if let Some(v) = value {
                *field = v.max(0.0);
            }
        }
        stats.normalize();
    }

    /// Patrol waypoints for an agent spawned at `origin`.
    pub fn patrol_for(&self, origin: Position) -> Vec<Position> {
        if !self.patrol.is_empty() {
            return self.patrol.clone();
        }
        match self.patrol_radius {
            Some(r) if r > 0.0 => vec![
                origin.offset(r, r),
                origin.offset(r, -r),
                origin.offset(-r, -r),
                origin.offset(-r, r),
            ],
            _ => Vec::new(),
        }
    }
}
