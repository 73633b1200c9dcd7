//! Per-agent numeric attributes and the two descriptive enumerations.

use std::fmt;
use std::str::FromStr;

use crate::NpcError;

// ── AgentStats ────────────────────────────────────────────────────────────────

/// Mutable numeric attributes owned one-per-agent.
///
/// `health` is kept in `[0, max_health]` by every mutator on this type.  An
/// agent whose health reaches zero is dead: it no longer acts, attacks, or
/// counts as a living enemy for anyone else.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentStats {
    pub health:       f32,
    pub max_health:   f32,
    pub attack_power: f32,
    pub defense:      f32,
    pub speed:        f32,
    pub vision_range: f32,
    pub hear_range:   f32,
    pub attack_range: f32,
    /// Behavioral dispositions, each in `[0, 1]`.
    pub aggression:   f32,
    pub bravery:      f32,
    pub intelligence: f32,
    /// Experience granted to whoever defeats this agent.
    pub xp_reward:    u32,
}

impl Default for AgentStats {
    fn default() -> Self {
        Self {
            health:       100.0,
            max_health:   100.0,
            attack_power: 25.0,
            defense:      10.0,
            speed:        5.0,
            vision_range: 20.0,
            hear_range:   15.0,
            attack_range: 2.5,
            aggression:   0.5,
            bravery:      0.5,
            intelligence: 0.5,
            xp_reward:    50,
        }
    }
}

impl AgentStats {
    /// Default stats with both `health` and `max_health` set to `hp`.
    pub fn with_health(hp: f32) -> Self {
        Self { health: hp, max_health: hp, ..Self::default() }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Current health as a fraction of maximum.  A zero maximum reads as 0.
    #[inline]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            0.0
        } else {
            self.health / self.max_health
        }
    }

    /// Subtract `amount` from health, clamping at zero.  Returns the health
    /// actually removed.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health - amount.max(0.0)).max(0.0);
        before - self.health
    }

    /// Re-establish the invariants after bulk field edits (template
    /// overrides, generated blueprints): `max_health` is floored at zero and
    /// grows to cover `health`, health is clamped into range, and the dispositions are
    /// clamped into `[0, 1]`.
    pub fn normalize(&mut self) {
        self.max_health = self.max_health.max(0.0);
        if self.max_health < self.health {
            self.max_health = self.health;
        }
        self.health = self.health.clamp(0.0, self.max_health);
        self.aggression = self.aggression.clamp(0.0, 1.0);
        self.bravery = self.bravery.clamp(0.0, 1.0);
        self.intelligence = self.intelligence.clamp(0.0, 1.0);
    }
}

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Generate a lower-case string enum with `Display`, `FromStr`, and `ALL`.
macro_rules! named_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident {
        $($(#[$vattr:meta])* $variant:ident => $text:literal),+ $(,)?
    }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
        $vis enum $name {
            $($(#[$vattr])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = NpcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(NpcError::Parse(format!(
                        "unknown {} '{}'", stringify!($name), other
                    ))),
                }
            }
        }
    };
}

named_enum! {
    /// Fixed enumeration shaping which behavior-tree variant an agent gets.
    pub enum Personality {
        Aggressive => "aggressive",
        Defensive  => "defensive",
        #[default]
        Neutral    => "neutral",
        Cowardly   => "cowardly",
        Brave      => "brave",
        Cunning    => "cunning",
        Friendly   => "friendly",
    }
}

named_enum! {
    /// Descriptive status tag set by tree leaves for external observation.
    ///
    /// Not to be confused with the states of a `StateMachine`: this tag only
    /// reports what the agent did most recently.
    pub enum BehaviorState {
        #[default]
        Idle        => "idle",
        Patrol      => "patrol",
        Chase       => "chase",
        Attack      => "attack",
        Flee        => "flee",
        Search      => "search",
        Investigate => "investigate",
        Interact    => "interact",
        Guard       => "guard",
        Dead        => "dead",
    }
}
