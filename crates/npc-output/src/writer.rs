//! The `EventWriter` trait implemented by all backend writers.

use crate::{BehaviorRow, CombatRow, OutputResult, TemplateRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Persistence is best-effort: [`PersistenceObserver`][crate::PersistenceObserver]
/// keeps the first error and carries on, so a failed write never stops a
/// simulation.
pub trait EventWriter {
    /// Insert or replace one template definition, keyed by `row.id`.
    fn write_template(&mut self, row: &TemplateRow) -> OutputResult<()>;

    /// Append a batch of resolved attacks.
    fn write_combat(&mut self, rows: &[CombatRow]) -> OutputResult<()>;

    /// Append a batch of behavior events.
    fn write_behavior(&mut self, rows: &[BehaviorRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
