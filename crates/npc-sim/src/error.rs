use npc_behavior::BehaviorError;
use npc_core::NpcError;
use npc_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] NpcError),

    #[error("could not build agent brain: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("pathfinding grid error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
