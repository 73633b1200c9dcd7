//! Integration tests for npc-output.

use chrono::{DateTime, Utc};
use npc_agent::{BehaviorEvent, CombatEvent, SpawnOverrides};
use npc_core::{AgentId, Position, SimConfig};
use npc_sim::Simulation;
use tempfile::TempDir;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn epoch(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("valid timestamp")
}

/// Guard and warrior standing next to each other, mutually hostile.
fn duel(total_ticks: u64) -> Simulation {
    let mut sim = Simulation::new(SimConfig { total_ticks, ..SimConfig::default() }).unwrap();
    let g = sim.spawn("guard", "Guard", Position::ORIGIN, SpawnOverrides::default()).unwrap();
    let w = sim.spawn("warrior", "Player", Position::new(1.0, 0.0, 0.0), SpawnOverrides::default()).unwrap();
    sim.add_enemies(&[g], &[w]);
    sim
}

fn combat_event(at: f64) -> CombatEvent {
    CombatEvent { attacker: AgentId(0), defender: AgentId(1), damage: 12.5, at }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{CsvWriter, EventWriter, PersistenceObserver};
    use npc_sim::SimObserver;

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_and_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(&dir, "npc_templates.csv"), ["id", "name", "personality", "stats", "created_at"]);
        assert_eq!(headers(&dir, "combat_log.csv"), ["attacker", "defender", "damage", "ts"]);
        assert_eq!(headers(&dir, "behavior_events.csv"), ["npc_id", "event", "data", "ts"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn observer_timestamps_from_sim_time() {
        let dir = tmp();
        let mut obs = PersistenceObserver::new(CsvWriter::new(dir.path()).unwrap(), epoch(0));
        obs.on_combat(&combat_event(1.5));
        obs.on_behavior(&BehaviorEvent::new(AgentId(1), "death", "0", 1.5));
        obs.on_sim_end(npc_core::Tick(1));
        assert!(obs.take_error().is_none());

        let combat = records(&dir, "combat_log.csv");
        assert_eq!(combat.len(), 1);
        assert_eq!(&combat[0][0], "0");
        assert_eq!(&combat[0][1], "1");
        assert_eq!(&combat[0][2], "12.5");
        assert_eq!(&combat[0][3], "1970-01-01T00:00:01.500+00:00");

        let behavior = records(&dir, "behavior_events.csv");
        assert_eq!(&behavior[0][0], "1");
        assert_eq!(&behavior[0][1], "death");
        assert_eq!(&behavior[0][2], "0");
    }

    #[test]
    fn templates_recorded() {
        let dir = tmp();
        let sim = duel(1);
        let mut obs = PersistenceObserver::new(CsvWriter::new(dir.path()).unwrap(), epoch(0));
        obs.record_agents(&sim.store);
        let boss = npc_agent::Template::lookup("boss").unwrap();
        obs.record_template(&boss);
        obs.on_sim_end(npc_core::Tick(0));
        assert!(obs.take_error().is_none());

        let rows = records(&dir, "npc_templates.csv");
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[0][1], "Guard");
        assert_eq!(&rows[0][2], "neutral");
        assert_eq!(&rows[2][0], "boss");
        let stats: serde_json::Value = serde_json::from_str(&rows[2][3]).unwrap();
        assert_eq!(stats["max_health"], 500.0);
        assert_eq!(&rows[2][4], "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn integration_csv() {
        let dir = tmp();
        let mut sim = duel(3);
        let mut obs = PersistenceObserver::new(CsvWriter::new(dir.path()).unwrap(), epoch(0));
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Both attack at tick 0; the 1.2 s cooldown covers ticks 1 and 2.
        let combat = records(&dir, "combat_log.csv");
        assert_eq!(combat.len(), 2);
        assert_eq!((&combat[0][0], &combat[0][1]), ("0", "1"));
        assert_eq!((&combat[1][0], &combat[1][1]), ("1", "0"));

        let behavior = records(&dir, "behavior_events.csv");
        assert!(behavior.iter().any(|r| &r[1] == "state" && &r[2] == "idle->attack"));
    }
}

// ── Error retention ───────────────────────────────────────────────────────────

#[cfg(test)]
mod error_tests {
    use super::*;
    use crate::{BehaviorRow, CombatRow, EventWriter, OutputError, OutputResult, PersistenceObserver, TemplateRow};
    use npc_sim::SimObserver;

    /// Writer whose every call fails, counting attempts.
    #[derive(Default)]
    struct Broken {
        attempts: usize,
    }

    impl Broken {
        fn fail(&mut self) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("attempt {}", self.attempts))))
        }
    }

    impl EventWriter for Broken {
        fn write_template(&mut self, _row: &TemplateRow) -> OutputResult<()> { self.fail() }
        fn write_combat(&mut self, _rows: &[CombatRow]) -> OutputResult<()> { self.fail() }
        fn write_behavior(&mut self, _rows: &[BehaviorRow]) -> OutputResult<()> { self.fail() }
        fn finish(&mut self) -> OutputResult<()> { self.fail() }
    }

    #[test]
    fn first_error_kept_and_sim_continues() {
        let mut sim = duel(5);
        let mut obs = PersistenceObserver::new(Broken::default(), epoch(0));
        sim.run(&mut obs);
        assert_eq!(sim.current_tick(), npc_core::Tick(5));

        let err = obs.take_error().expect("error retained");
        assert!(err.to_string().contains("attempt 1"));
        assert!(obs.take_error().is_none());
        // Writes kept being attempted after the first failure.
        assert!(obs.into_writer().attempts > 5);
    }

    #[test]
    fn record_on_broken_writer_does_not_panic() {
        let sim = duel(1);
        let mut obs = PersistenceObserver::new(Broken::default(), epoch(0));
        obs.record_agents(&sim.store);
        obs.on_combat(&combat_event(0.0));
        obs.on_tick_end(npc_core::Tick(0), 2);
        assert!(obs.take_error().is_some());
    }
}

// ── JSON export ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod export_tests {
    use super::*;
    use crate::{EXPORT_SCHEMA, export_world_state, export_world_state_at};

    #[test]
    fn export_named_by_unix_time() {
        let dir = tmp();
        let sim = duel(1);
        let path = export_world_state_at(dir.path(), &sim.world_state(), epoch(1_700_000_000)).unwrap();
        assert_eq!(path, dir.path().join("npc_config_1700000000.json"));
        assert!(path.exists());
    }

    #[test]
    fn export_contents() {
        let dir = tmp();
        let mut sim = duel(1);
        sim.get_mut(AgentId(1)).unwrap().stats.health = 99.96;
        let path = export_world_state_at(dir.path(), &sim.world_state(), epoch(1_700_000_000)).unwrap();

        let doc: serde_json::Value = serde_json::from_reader(std::fs::File::open(path).unwrap()).unwrap();
        assert_eq!(doc["schema"], EXPORT_SCHEMA);
        assert!(doc["generated"].as_str().unwrap().starts_with("2023-11-14T22:13:20"));

        let npcs = doc["npcs"].as_array().unwrap();
        assert_eq!(npcs.len(), 2);
        assert_eq!(npcs[0]["npc_id"], 0);
        assert_eq!(npcs[0]["name"], "Guard");
        assert_eq!(npcs[0]["type"], "guard");
        assert_eq!(npcs[0]["state"], "idle");
        assert_eq!(npcs[0]["personality"], "neutral");
        assert_eq!(npcs[0]["pos"]["x"], 0.0);
        assert_eq!(npcs[0]["max_hp"], 120.0);
        assert_eq!(npcs[1]["hp"].as_f64().unwrap() as f32, 100.0);
    }

    #[test]
    fn export_creates_directory() {
        let dir = tmp();
        let nested = dir.path().join("exports").join("run1");
        let path = export_world_state(&nested, &duel(1).world_state()).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("npc_config_"));
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use super::*;
    use crate::sqlite::{DB_FILE, SqliteWriter};
    use crate::{BehaviorRow, CombatRow, EventWriter, PersistenceObserver, TemplateRow};

    fn open(dir: &TempDir) -> rusqlite::Connection {
        rusqlite::Connection::open(dir.path().join(DB_FILE)).unwrap()
    }

    fn count(conn: &rusqlite::Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("behavior_system.db").exists());
    }

    #[test]
    fn template_upsert() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let guard = npc_agent::Template::lookup("guard").unwrap();
        let mut row = TemplateRow::from_template(&guard, epoch(0)).unwrap();
        w.write_template(&row).unwrap();
        row.name = "Sentinel".into();
        w.write_template(&row).unwrap();
        w.finish().unwrap();

        let conn = open(&dir);
        assert_eq!(count(&conn, "npc_templates"), 1);
        let name: String = conn
            .query_row("SELECT name FROM npc_templates WHERE id = 'guard'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name, "Sentinel");
    }

    #[test]
    fn combat_and_behavior_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let ts = epoch(0).to_rfc3339();
        w.write_combat(&[CombatRow::new(&combat_event(0.0), ts.clone()), CombatRow::new(&combat_event(0.5), ts.clone())])
            .unwrap();
        w.write_behavior(&[BehaviorRow::new(&BehaviorEvent::new(AgentId(3), "state", "idle->chase", 0.0), ts)])
            .unwrap();
        w.write_combat(&[]).unwrap();
        w.finish().unwrap();

        let conn = open(&dir);
        assert_eq!(count(&conn, "combat_log"), 2);
        let damage: f64 = conn.query_row("SELECT damage FROM combat_log WHERE id = 1", [], |r| r.get(0)).unwrap();
        assert_eq!(damage, 12.5);
        let (npc, data): (String, String) = conn
            .query_row("SELECT npc_id, data FROM behavior_events", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!((npc.as_str(), data.as_str()), ("3", "idle->chase"));
    }

    #[test]
    fn integration_sqlite() {
        let dir = tmp();
        let mut sim = duel(3);
        let mut obs = PersistenceObserver::new(SqliteWriter::new(dir.path()).unwrap(), epoch(0));
        obs.record_agents(&sim.store);
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());

        let conn = open(&dir);
        assert_eq!(count(&conn, "npc_templates"), 2);
        assert_eq!(count(&conn, "combat_log"), 2);
    }
}
