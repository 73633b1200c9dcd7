//! `npc-sim`: the population manager for the NPC engine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Start   : observer.on_tick_start(tick)
//!   ② Agents  : for each id in ascending order, if still alive:
//!                  tick its brain (behavior tree or guard state machine)
//!   ③ Events  : forward combat and behavior events to the observer
//!   ④ End     : observer.on_tick_end(tick, alive), snapshot on interval
//!   ⑤ Clock   : advance one tick (cooldowns read simulated time)
//! ```
//!
//! # Modules
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | `sim`      | `Simulation`: spawn, relations, tick loop, queries  |
//! | `builder`  | `SimBuilder`: cover points, obstacles, action set   |
//! | `observer` | `SimObserver` hooks and `NoopObserver`              |
//! | `world`    | `WorldSnapshot` / `AgentSummary` for export         |
//!
//! # Quick-start
//!
//! ```rust
//! use npc_agent::SpawnOverrides;
//! use npc_core::{Position, SimConfig};
//! use npc_sim::Simulation;
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let g = sim.spawn("guard", "Guard", Position::ORIGIN, SpawnOverrides::default()).unwrap();
//! let p = sim.spawn("warrior", "Player", Position::new(3.0, 0.0, 0.0), SpawnOverrides::default()).unwrap();
//! sim.add_enemies(&[g], &[p]);
//! sim.simulate(30);
//! assert_eq!(sim.world_state().total, 2);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
pub use world::{AgentSummary, WorldSnapshot};
