//! Agent identity.
//!
//! Ids are handed out by the agent store from a counter that only moves
//! forward, so a despawned agent's id is never reused and a stale id can only
//! resolve to "not found".

use std::fmt;

/// Identity of one agent.  Ordered by allocation, which is also the order
/// agents take their turns in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Placeholder for "no agent", e.g. before the first turn of a tick.
    pub const INVALID: AgentId = AgentId(u32::MAX);

    /// First id the store allocates.
    pub const FIRST: AgentId = AgentId(0);

    #[inline]
    pub fn next(self) -> AgentId {
        AgentId(self.0 + 1)
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "npc#{}", self.0)
    }
}
