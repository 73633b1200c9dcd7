//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `npc-spatial`.
///
/// Path queries never fail: an unreachable goal is an empty path.  Only
/// constructing a grid can.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
