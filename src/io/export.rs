//! Export the run summary to JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::nps::NpsSummary;
use crate::plot::BIN_COUNT;
use crate::ratings::ExtractionAudit;

/// On-disk layout of the JSON export.
#[derive(Debug, Serialize)]
pub struct SummaryFile<'a> {
    pub tool: &'static str,
    pub source: String,
    pub column: &'a str,
    pub audit: ExtractionAudit,
    pub summary: &'a NpsSummary,
    /// Ratings per bin, index `k` centred on rating `k`.
    pub histogram: [usize; BIN_COUNT],
}

impl<'a> SummaryFile<'a> {
    pub fn from_run(run: &'a RunOutput) -> Self {
        Self {
            tool: "nps",
            source: run.file_path.display().to_string(),
            column: &run.column,
            audit: run.extraction.audit,
            summary: &run.summary,
            histogram: run.histogram,
        }
    }
}

/// Write the summary JSON file.
pub fn write_summary_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &SummaryFile::from_run(run))
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    log::info!("wrote summary JSON to {}", path.display());
    Ok(())
}
