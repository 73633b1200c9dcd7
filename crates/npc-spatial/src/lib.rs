//! `npc-spatial`: grid pathfinding.
//!
//! # Crate layout
//!
//! | Module   | Contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | [`grid`] | `GridCell`, `GridPathfinder` (A*), `path_cost`            |
//! | [`error`]| `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridCell`.             |

pub mod error;
pub mod grid;


pub use error::{SpatialError, SpatialResult};
pub use grid::{DIAGONAL_COST, GridCell, GridPathfinder, ORTHOGONAL_COST, path_cost};
