//! World-space position type and movement helpers.
//!
//! `Position` uses `f32` components.  Agents move on the horizontal `x`/`z`
//! plane; `y` is carried through unchanged so snapshots exported to 3D tools
//! keep their elevation.

/// Below this planar distance a move request is treated as "already there".
const ARRIVAL_EPSILON: f32 = 0.05;

/// A point in world space.  `Copy`, so every snapshot is an independent value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in all three axes.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance on the horizontal `x`/`z` plane only.
    #[inline]
    pub fn planar_distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Move `step` units toward `target` on the `x`/`z` plane.
    ///
    /// Returns `self` unchanged when already within a few centimetres of the
    /// target, so callers never divide by a vanishing distance.
    pub fn step_toward(self, target: Position, step: f32) -> Position {
        let d = self.planar_distance(target);
        if d <= ARRIVAL_EPSILON {
            return self;
        }
        Position {
            x: self.x + (target.x - self.x) / d * step,
            y: self.y,
            z: self.z + (target.z - self.z) / d * step,
        }
    }

    /// Move `step` units directly away from `threat` on the `x`/`z` plane.
    pub fn step_away(self, threat: Position, step: f32) -> Position {
        let d = self.planar_distance(threat);
        if d <= ARRIVAL_EPSILON {
            return self;
        }
        Position {
            x: self.x + (self.x - threat.x) / d * step,
            y: self.y,
            z: self.z + (self.z - threat.z) / d * step,
        }
    }

    /// Offset on the horizontal plane, keeping `y`.
    #[inline]
    pub fn offset(self, dx: f32, dz: f32) -> Position {
        Position { x: self.x + dx, y: self.y, z: self.z + dz }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1},{:.1},{:.1})", self.x, self.y, self.z)
    }
}
