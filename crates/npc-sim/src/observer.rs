//! Simulation observer trait for progress reporting and data collection.

use npc_agent::{AgentStore, BehaviorEvent, CombatEvent};
use npc_core::Tick;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] and
/// [`Simulation::run_ticks`][crate::Simulation::run_ticks] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example
///
/// ```rust
/// use npc_agent::BehaviorEvent;
/// use npc_sim::SimObserver;
///
/// #[derive(Default)]
/// struct Kills(usize);
///
/// impl SimObserver for Kills {
///     fn on_behavior(&mut self, event: &BehaviorEvent) {
///         if event.event == "death" {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per attack resolved this tick, in resolution order.
    fn on_combat(&mut self, _event: &CombatEvent) {}

    /// Called once per state change or death this tick, in emission order.
    fn on_behavior(&mut self, _event: &BehaviorEvent) {}

    /// Called at the end of each tick with the number of agents still alive.
    fn on_tick_end(&mut self, _tick: Tick, _alive: usize) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every agent.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick of [`Simulation::run`][crate::Simulation::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
