//! Export helpers for planner runs: one CSV row per dispensed frame plus a
//! JSON run summary sidecar.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the frames CSV.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecord {
    pub step: usize,
    pub global_time: f64,
    pub proper_time: f64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub fuel: f64,
    pub collected_count: usize,
}

/// Aggregate metrics of a solved run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub path_length: usize,
    pub total_cost: f64,
    pub collected: Vec<u32>,
    /// Wall-clock timestamp of the export, RFC 3339.
    pub generated_at: String,
}

impl RunSummary {
    pub fn new(path_length: usize, total_cost: f64, collected: Vec<u32>) -> Self {
        Self {
            path_length,
            total_cost,
            collected,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write the frame rows as CSV, creating parent directories as needed.
pub fn write_frames_csv(path: &Path, records: &[FrameRecord]) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the run summary as pretty-printed JSON next to the CSV.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
