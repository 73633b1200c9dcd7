//! A* over a bounded integer grid.
//!
//! # Moves and costs
//!
//! Every cell has eight neighbors.  Orthogonal steps cost
//! [`ORTHOGONAL_COST`], diagonal steps [`DIAGONAL_COST`].  The heuristic is
//! the Manhattan distance to the goal, which overestimates diagonal travel,
//! so the search is greedy toward the goal rather than strictly optimal on
//! open ground.
//!
//! # Determinism
//!
//! The open set is ordered by `(f, insertion sequence)`, so equal-`f`
//! entries pop in the order they were pushed.  A cell is expanded at most
//! once.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use npc_core::Position;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{SpatialError, SpatialResult};

pub const ORTHOGONAL_COST: f64 = 1.0;
pub const DIAGONAL_COST: f64 = 1.414;

const NEIGHBORS: [(i32, i32); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

// ── GridCell ──────────────────────────────────────────────────────────────────

/// One integer grid cell on the `x`/`z` plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The cell containing `p`; coordinates truncate toward zero and `y` is
    /// ignored.
    #[inline]
    pub fn from_position(p: Position) -> Self {
        Self { x: p.x as i32, z: p.z as i32 }
    }

    /// Cell corner as a world position at `y = 0`.
    #[inline]
    pub fn to_position(self) -> Position {
        Position::new(self.x as f32, 0.0, self.z as f32)
    }

    #[inline]
    pub fn manhattan(self, other: GridCell) -> f64 {
        f64::from((self.x - other.x).abs() + (self.z - other.z).abs())
    }
}

/// Sum of step costs along `path`.  Non-adjacent consecutive cells are
/// charged as a single orthogonal or diagonal step.
pub fn path_cost(path: &[GridCell]) -> f64 {
    path.windows(2)
        .map(|w| {
            if w[0].x != w[1].x && w[0].z != w[1].z { DIAGONAL_COST } else { ORTHOGONAL_COST }
        })
        .sum()
}

// ── Open set ──────────────────────────────────────────────────────────────────

struct OpenEntry {
    f:    f64,
    seq:  u64,
    cell: GridCell,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest (f, seq) is "greatest".
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── GridPathfinder ────────────────────────────────────────────────────────────

/// Fixed-size grid with a set of blocked cells.
///
/// Stateless between queries apart from the obstacle set.
#[derive(Clone, Debug)]
pub struct GridPathfinder {
    width:     u32,
    height:    u32,
    obstacles: FxHashSet<GridCell>,
}

impl Default for GridPathfinder {
    /// A 100×100 grid with no obstacles.
    fn default() -> Self {
        Self { width: 100, height: 100, obstacles: FxHashSet::default() }
    }
}

impl GridPathfinder {
    pub fn new(width: u32, height: u32) -> SpatialResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpatialError::EmptyGrid { width, height });
        }
        Ok(Self { width, height, obstacles: FxHashSet::default() })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn block(&mut self, x: i32, z: i32) {
        self.obstacles.insert(GridCell::new(x, z));
    }

    pub fn unblock(&mut self, x: i32, z: i32) -> bool {
        self.obstacles.remove(&GridCell::new(x, z))
    }

    pub fn is_blocked(&self, cell: GridCell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.z >= 0 && (cell.x as u32) < self.width && (cell.z as u32) < self.height
    }

    #[inline]
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        self.in_bounds(cell) && !self.is_blocked(cell)
    }

    /// Path between the cells containing `start` and `end`, as cell-corner
    /// positions.  Empty when unreachable.
    pub fn find_path(&self, start: Position, end: Position) -> Vec<Position> {
        self.find_cells(GridCell::from_position(start), GridCell::from_position(end))
            .into_iter()
            .map(GridCell::to_position)
            .collect()
    }

    /// Cell path from `start` to `goal`, inclusive of both.
    ///
    /// Returns `[start]` when `start == goal`, and an empty path when either
    /// endpoint is blocked or outside the grid or the goal is unreachable.
    pub fn find_cells(&self, start: GridCell, goal: GridCell) -> Vec<GridCell> {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut g_score: FxHashMap<GridCell, f64> = FxHashMap::default();
        let mut came_from: FxHashMap<GridCell, GridCell> = FxHashMap::default();
        let mut closed: FxHashSet<GridCell> = FxHashSet::default();
        let mut seq = 0_u64;

        g_score.insert(start, 0.0);
        open.push(OpenEntry { f: start.manhattan(goal), seq, cell: start });

        while let Some(OpenEntry { cell, .. }) = open.pop() {
            if cell == goal {
                let path = reconstruct(&came_from, goal);
                debug!(?start, ?goal, len = path.len(), expanded = closed.len(), "path found");
                return path;
            }
            if !closed.insert(cell) {
                continue;
            }
            let g = g_score.get(&cell).copied().unwrap_or(0.0);

            for (dx, dz) in NEIGHBORS {
                let next = GridCell::new(cell.x + dx, cell.z + dz);
                if closed.contains(&next) || !self.is_walkable(next) {
                    continue;
                }
                let step = if dx != 0 && dz != 0 { DIAGONAL_COST } else { ORTHOGONAL_COST };
                let tentative = g + step;
                if g_score.get(&next).is_some_and(|&known| known <= tentative) {
                    continue;
                }
                g_score.insert(next, tentative);
                came_from.insert(next, cell);
                seq += 1;
                open.push(OpenEntry { f: tentative + next.manhattan(goal), seq, cell: next });
            }
        }

        debug!(?start, ?goal, expanded = closed.len(), "goal unreachable");
        Vec::new()
    }
}

fn reconstruct(came_from: &FxHashMap<GridCell, GridCell>, goal: GridCell) -> Vec<GridCell> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    path
}
