//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `NpcError` as one
//! variant where they need to surface a core failure.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `npc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum NpcError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `npc-*` crates.
pub type NpcResult<T> = Result<T, NpcError>;
