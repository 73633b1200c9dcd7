//! Fluent builder for constructing a [`Simulation`].

use npc_agent::AgentStore;
use npc_core::{Position, SimConfig, SimRng};
use npc_goap::{GoapAction, GoapPlanner, default_actions};
use npc_spatial::GridPathfinder;

use crate::{SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                          |
/// |---------------------|----------------------------------|
/// | `.cover_point(p)`   | No cover points                  |
/// | `.obstacle(x, z)`   | Every grid cell walkable         |
/// | `.actions(v)`       | The standard GOAP action catalog |
///
/// # Example
///
/// ```rust
/// use npc_core::{Position, SimConfig};
/// use npc_sim::SimBuilder;
///
/// let sim = SimBuilder::new(SimConfig::default())
///     .cover_point(Position::new(3.0, 0.0, 3.0))
///     .obstacle(1, 1)
///     .build()
///     .unwrap();
/// assert_eq!(sim.store.cover_points().len(), 1);
/// assert_eq!(sim.pathfinder.obstacle_count(), 1);
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    cover_points: Vec<Position>,
    obstacles:    Vec<(i32, i32)>,
    actions:      Option<Vec<GoapAction>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, cover_points: Vec::new(), obstacles: Vec::new(), actions: None }
    }

    pub fn cover_point(mut self, p: Position) -> Self {
        self.cover_points.push(p);
        self
    }

    /// Mark grid cell `(x, z)` impassable for the shared pathfinder.
    pub fn obstacle(mut self, x: i32, z: i32) -> Self {
        self.obstacles.push((x, z));
        self
    }

    /// Replace the planner's action set.
    pub fn actions(mut self, actions: Vec<GoapAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Validate the config and assemble the shared subsystems.
    pub fn build(self) -> SimResult<Simulation> {
        self.config.validate()?;

        let mut pathfinder = GridPathfinder::new(self.config.grid_width, self.config.grid_height)?;
        for (x, z) in self.obstacles {
            pathfinder.block(x, z);
        }

        let planner = GoapPlanner::new(self.actions.unwrap_or_else(default_actions))
            .with_max_depth(self.config.plan_depth);

        let mut store = AgentStore::new(&self.config);
        for p in self.cover_points {
            store.add_cover_point(p);
        }

        Ok(Simulation {
            rng: SimRng::new(self.config.seed),
            config: self.config,
            store,
            pathfinder,
            planner,
        })
    }
}
