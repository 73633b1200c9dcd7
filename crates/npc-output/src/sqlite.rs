//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `behavior_system.db` file in the configured output
//! directory with three tables: `npc_templates`, `combat_log` and
//! `behavior_events`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::EventWriter;
use crate::{BehaviorRow, CombatRow, OutputResult, TemplateRow};

/// File name of the database created in the output directory.
pub const DB_FILE: &str = "behavior_system.db";

/// Writes persistence rows to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) [`DB_FILE`] in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS npc_templates (
                 id          TEXT PRIMARY KEY,
                 name        TEXT,
                 personality TEXT,
                 stats       TEXT,
                 created_at  TEXT
             );
             CREATE TABLE IF NOT EXISTS combat_log (
                 id       INTEGER PRIMARY KEY AUTOINCREMENT,
                 attacker TEXT,
                 defender TEXT,
                 damage   REAL,
                 ts       TEXT
             );
             CREATE TABLE IF NOT EXISTS behavior_events (
                 id     INTEGER PRIMARY KEY AUTOINCREMENT,
                 npc_id TEXT,
                 event  TEXT,
                 data   TEXT,
                 ts     TEXT
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl EventWriter for SqliteWriter {
    fn write_template(&mut self, row: &TemplateRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO npc_templates (id, name, personality, stats, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![row.id, row.name, row.personality, row.stats, row.created_at],
        )?;
        Ok(())
    }

    fn write_combat(&mut self, rows: &[CombatRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO combat_log (attacker, defender, damage, ts) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.attacker, row.defender, row.damage, row.ts])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_behavior(&mut self, rows: &[BehaviorRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO behavior_events (npc_id, event, data, ts) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.npc_id, row.event, row.data, row.ts])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
