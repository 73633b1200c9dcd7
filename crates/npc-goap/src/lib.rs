//! `npc-goap`: goal-oriented action planning.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`state`]   | `Fact`, `WorldState`                                  |
//! | [`action`]  | `GoapAction`, `default_actions` (the combat catalog)  |
//! | [`planner`] | `GoapPlanner`, `Plan`                                 |
//!
//! The planner is an exhaustive depth-bounded search.  It makes no use of a
//! heuristic, so the plan it returns is the cheapest one reachable within
//! the depth bound, with ties going to the first plan found in catalog order.

pub mod action;
pub mod planner;
pub mod state;

#[cfg(test)]
mod tests;

pub use action::{GoapAction, default_actions};
pub use planner::{DEFAULT_PLAN_DEPTH, GoapPlanner, Plan};
pub use state::{Fact, WorldState};
