//! Rendering and persistence of statistics records for the CLI

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blogstatslib::{Formatter, StatsRecord};
use tracing::info;

/// Data directory, relative to the site source, that receives saved stats
pub const DATA_DIR: &str = "_data";

/// File name of the saved stats inside [`DATA_DIR`]
pub const STATS_FILE: &str = "stats.json";

/// Render a record as pretty-printed JSON
pub fn render_json(record: &StatsRecord) -> Result<String> {
    serde_json::to_string_pretty(record).context("failed to serialize stats")
}

/// Render a record as the text report, newline terminated
pub fn render_text(record: &StatsRecord) -> String {
    let mut report = Formatter::new(record).to_report();
    if !report.ends_with('\n') {
        report.push('\n');
    }
    report
}

/// Write a record to `<source>/_data/stats.json`, returning the written path
pub fn save_stats(source: &Path, record: &StatsRecord) -> Result<PathBuf> {
    let data_dir = source.join(DATA_DIR);
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    let path = data_dir.join(STATS_FILE);
    fs::write(&path, render_json(record)?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "stats saved");
    Ok(path)
}
