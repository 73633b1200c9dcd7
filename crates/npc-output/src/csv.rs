//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `npc_templates.csv`
//! - `combat_log.csv`
//! - `behavior_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{BehaviorRow, CombatRow, OutputResult, TemplateRow};

/// Writes persistence rows to three CSV files.
///
/// CSV is append-only, so a template written twice appears twice; readers
/// should keep the last row per `id`.
pub struct CsvWriter {
    templates: Writer<File>,
    combat:    Writer<File>,
    behavior:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut templates = Writer::from_path(dir.join("npc_templates.csv"))?;
        templates.write_record(["id", "name", "personality", "stats", "created_at"])?;

        let mut combat = Writer::from_path(dir.join("combat_log.csv"))?;
        combat.write_record(["attacker", "defender", "damage", "ts"])?;

        let mut behavior = Writer::from_path(dir.join("behavior_events.csv"))?;
        behavior.write_record(["npc_id", "event", "data", "ts"])?;

        Ok(Self { templates, combat, behavior, finished: false })
    }
}

impl EventWriter for CsvWriter {
    fn write_template(&mut self, row: &TemplateRow) -> OutputResult<()> {
        self.templates.write_record([
            row.id.as_str(),
            row.name.as_str(),
            row.personality.as_str(),
            row.stats.as_str(),
            row.created_at.as_str(),
        ])?;
        Ok(())
    }

    fn write_combat(&mut self, rows: &[CombatRow]) -> OutputResult<()> {
        for row in rows {
            self.combat.write_record(&[
                row.attacker.clone(),
                row.defender.clone(),
                row.damage.to_string(),
                row.ts.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_behavior(&mut self, rows: &[BehaviorRow]) -> OutputResult<()> {
        for row in rows {
            self.behavior.write_record([
                row.npc_id.as_str(),
                row.event.as_str(),
                row.data.as_str(),
                row.ts.as_str(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.templates.flush()?;
        self.combat.flush()?;
        self.behavior.flush()?;
        Ok(())
    }
}
