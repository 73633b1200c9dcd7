//! `PersistenceObserver<W>`: bridges `SimObserver` to an `EventWriter`.

use chrono::{DateTime, TimeDelta, Utc};
use npc_agent::{AgentStore, BehaviorEvent, CombatEvent, Template};
use npc_core::Tick;
use npc_sim::SimObserver;
use tracing::warn;

use crate::row::{BehaviorRow, CombatRow, TemplateRow};
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that logs every combat and behavior event to any
/// [`EventWriter`] backend.
///
/// Events are buffered during a tick and written as one batch at its end.
/// Timestamps are the run's start time plus the event's simulated seconds.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  Only the first is kept (and logged); after the run,
/// check with [`take_error`][Self::take_error].
pub struct PersistenceObserver<W: EventWriter> {
    writer:     W,
    started:    DateTime<Utc>,
    combat:     Vec<CombatRow>,
    behavior:   Vec<BehaviorRow>,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> PersistenceObserver<W> {
    /// Create an observer backed by `writer` for a run that began at
    /// `started`.
    pub fn new(writer: W, started: DateTime<Utc>) -> Self {
        Self {
            writer,
            started,
            combat:     Vec::new(),
            behavior:   Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Persist one catalog template.
    pub fn record_template(&mut self, template: &Template) {
        let result = TemplateRow::from_template(template, self.started)
            .and_then(|row| self.writer.write_template(&row));
        self.store_err(result);
    }

    /// Persist the effective template of every agent in `store`.
    pub fn record_agents(&mut self, store: &AgentStore) {
        for agent in store.iter() {
            let result = TemplateRow::from_agent(agent, self.started)
                .and_then(|row| self.writer.write_template(&row));
            self.store_err(result);
        }
    }

    fn timestamp(&self, sim_secs: f64) -> String {
        let offset = TimeDelta::milliseconds((sim_secs * 1000.0).round() as i64);
        (self.started + offset).to_rfc3339()
    }

    fn flush(&mut self) {
        let combat = std::mem::take(&mut self.combat);
        let result = self.writer.write_combat(&combat);
        self.store_err(result);

        let behavior = std::mem::take(&mut self.behavior);
        let result = self.writer.write_behavior(&behavior);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "persistence write failed; continuing without it");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> SimObserver for PersistenceObserver<W> {
    fn on_combat(&mut self, event: &CombatEvent) {
        let ts = self.timestamp(event.at);
        self.combat.push(CombatRow::new(event, ts));
    }

    fn on_behavior(&mut self, event: &BehaviorEvent) {
        let ts = self.timestamp(event.at);
        self.behavior.push(BehaviorRow::new(event, ts));
    }

    fn on_tick_end(&mut self, _tick: Tick, _alive: usize) {
        self.flush();
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.flush();
        let result = self.writer.finish();
        self.store_err(result);
    }
}
