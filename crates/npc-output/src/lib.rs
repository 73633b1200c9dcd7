//! `npc-output`: persistence and export for the NPC engine.
//!
//! Two logging backends are provided:
//!
//! | Feature   | Backend | Files created                                                 |
//! |-----------|---------|---------------------------------------------------------------|
//! | *(none)*  | CSV     | `npc_templates.csv`, `combat_log.csv`, `behavior_events.csv`  |
//! | `sqlite`  | SQLite  | `behavior_system.db`                                          |
//!
//! Both implement [`EventWriter`] and are driven by [`PersistenceObserver`],
//! which implements `npc_sim::SimObserver`.  [`export_world_state`] writes a
//! one-off JSON snapshot of the population.
//!
//! # Usage
//!
//! ```rust,ignore
//! use npc_output::{CsvWriter, PersistenceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = PersistenceObserver::new(writer, Utc::now());
//! obs.record_agents(&sim.store);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use export::{EXPORT_SCHEMA, export_world_state, export_world_state_at};
pub use observer::PersistenceObserver;
pub use row::{BehaviorRow, CombatRow, TemplateRow};
pub use writer::EventWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
