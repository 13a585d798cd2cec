//! The report pipeline, independent of prompts and presentation.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load table -> validate column -> extract ratings -> classify/aggregate -> bin
//!
//! Callers pass already-resolved inputs (path, column) and decide how to
//! present the result (text report, chart window, JSON export).

use std::path::{Path, PathBuf};

use crate::error::NpsError;
use crate::io::table::load_table;
use crate::nps::{NpsSummary, summarize};
use crate::plot::{BIN_COUNT, histogram_bins};
use crate::ratings::{Extraction, extract_ratings};

/// All computed outputs of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub file_path: PathBuf,
    pub column: String,
    pub extraction: Extraction,
    pub summary: NpsSummary,
    pub histogram: [usize; BIN_COUNT],
}

/// Execute the full pipeline for one file and column.
pub fn run_report(file_path: &Path, column: &str) -> Result<RunOutput, NpsError> {
    // 1) Load the table.
    let table = load_table(file_path)?;

    // 2) Validate the column and extract ratings.
    let extraction = extract_ratings(&table, column)?;

    // 3) Classify, aggregate, bin.
    let summary = summarize(&extraction.series);
    let histogram = histogram_bins(&extraction.series);

    log::debug!("nps={:.4} over {} rating(s)", summary.nps, summary.total);

    Ok(RunOutput {
        file_path: file_path.to_path_buf(),
        column: column.to_string(),
        extraction,
        summary,
        histogram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn balanced_sample_end_to_end() {
        let file = csv_file("id,NPS\n1,10\n2,10\n3,9\n4,8\n5,7\n6,6\n7,5\n8,0\n");
        let run = run_report(file.path(), "NPS").unwrap();
        assert_eq!(run.summary.promoters.count, 3);
        assert_eq!(run.summary.passives.count, 2);
        assert_eq!(run.summary.detractors.count, 3);
        assert!(run.summary.nps.abs() < 1e-9);
        assert_eq!(run.histogram[10], 2);
        assert_eq!(run.histogram[0], 1);
    }

    #[test]
    fn mixed_values_are_coerced_and_filtered() {
        let file = csv_file("score\n9\nabc\n11\n-1\n7.5\n");
        let run = run_report(file.path(), "score").unwrap();
        assert_eq!(run.extraction.series.values(), &[9.0, 7.5]);
        assert_eq!(run.summary.promoters.count, 1);
        assert_eq!(run.summary.passives.count, 1);
        assert_eq!(run.summary.detractors.count, 0);
        assert!((run.summary.nps - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_column_halts_with_available_names() {
        let file = csv_file("Respondent,Likelihood to recommend\n1,9\n");
        let err = run_report(file.path(), "nps").unwrap_err();
        assert_eq!(
            err,
            NpsError::ColumnNotFound {
                column: "nps".to_string(),
                available: vec!["Respondent".to_string(), "Likelihood to recommend".to_string()],
            }
        );
    }

    #[test]
    fn text_column_halts_with_no_valid_ratings() {
        let file = csv_file("comment\ngreat\nmeh\n");
        assert_eq!(run_report(file.path(), "comment").unwrap_err(), NpsError::NoValidRatings);
    }

    #[test]
    fn out_of_range_column_halts_separately() {
        let file = csv_file("score\n11\n42\n-5\n");
        assert_eq!(run_report(file.path(), "score").unwrap_err(), NpsError::NoRatingsInRange);
    }

    #[test]
    fn reruns_are_identical() {
        let file = csv_file("NPS\n3\n9\n10\n7\n8.5\n\n6\n");
        let first = run_report(file.path(), "NPS").unwrap();
        let second = run_report(file.path(), "NPS").unwrap();
        assert_eq!(first, second);
    }
}
