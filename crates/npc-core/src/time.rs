//! Tick counter and the simulated-seconds clock.
//!
//! Movement step length, cooldown windows, and event timestamps all read
//! `elapsed_secs = tick * tick_duration_secs` from [`SimClock`], never the
//! host's wall clock, so a run replays identically anywhere.

use std::fmt;

/// One 60 Hz frame.
pub const DEFAULT_TICK_SECS: f64 = 0.016;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub tick_duration_secs: f64,
    pub current_tick:       Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f64) -> Self {
        Self { tick_duration_secs, current_tick: Tick::default() }
    }

    pub fn advance(&mut self) {
        self.current_tick.0 += 1;
    }

    /// Simulated seconds since tick 0.
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_SECS)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the population manager.  Every field has a default so partial files work.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Movement step length is
    /// `speed * multiplier * tick_duration_secs`.
    pub tick_duration_secs: f64,

    /// Ticks run by `Simulation::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Entries kept in each agent's action memory before the oldest is
    /// dropped.
    pub memory_capacity: usize,

    /// Dimensions of the shared pathfinding grid, in cells.
    pub grid_width:  u32,
    pub grid_height: u32,

    /// Maximum plan length explored by the shared GOAP planner.
    pub plan_depth: usize,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:    DEFAULT_TICK_SECS,
            total_ticks:           60,
            seed:                  42,
            memory_capacity:       64,
            grid_width:            100,
            grid_height:           100,
            plan_depth:            10,
            output_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which `Simulation::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> crate::NpcResult<()> {
        if !(self.tick_duration_secs > 0.0) {
            return Err(crate::NpcError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(crate::NpcError::Config("grid dimensions must be non-zero".into()));
        }
        Ok(())
    }
}
