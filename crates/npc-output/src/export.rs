//! JSON export of a [`WorldSnapshot`] for external tooling.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use npc_sim::{AgentSummary, WorldSnapshot};
use serde::Serialize;
use tracing::info;

use crate::OutputResult;

/// Version tag written into every export.
pub const EXPORT_SCHEMA: &str = "1.0";

#[derive(Serialize)]
struct ExportDoc<'a> {
    schema:    &'static str,
    generated: String,
    npcs:      &'a [AgentSummary],
}

/// Write `snapshot` to `dir/npc_config_<unix seconds>.json`, creating `dir`
/// if needed.  Returns the path written.
pub fn export_world_state(dir: &Path, snapshot: &WorldSnapshot) -> OutputResult<PathBuf> {
    export_world_state_at(dir, snapshot, Utc::now())
}

/// [`export_world_state`] with an explicit generation time.
pub fn export_world_state_at(
    dir:      &Path,
    snapshot: &WorldSnapshot,
    now:      DateTime<Utc>,
) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("npc_config_{}.json", now.timestamp()));

    let doc = ExportDoc {
        schema:    EXPORT_SCHEMA,
        generated: now.naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        npcs:      &snapshot.npcs,
    };
    let mut out = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut out, &doc)?;
    std::io::Write::flush(&mut out)?;

    info!(path = %path.display(), npcs = snapshot.npcs.len(), "exported world state");
    Ok(path)
}
