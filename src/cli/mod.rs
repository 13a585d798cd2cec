//! Command-line parsing for the NPS report.
//!
//! The goal of this module is to keep **argument parsing** and **interactive
//! prompting** separate from the pipeline, which only ever sees resolved inputs.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::ChartMode;

pub mod prompt;

/// Top-level CLI.
///
/// Every input may also come from the environment (or a `.env` file); anything
/// still missing is asked for interactively.
#[derive(Debug, Parser)]
#[command(
    name = "nps",
    version,
    about = "Net Promoter Score summary for a rating column in a CSV or Excel file"
)]
pub struct Cli {
    /// CSV or Excel file (.csv, .xlsx, .xls). Prompted for when omitted.
    #[arg(short = 'f', long, env = "NPS_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Exact (case-sensitive) name of the rating column. Prompted for when omitted.
    #[arg(short = 'c', long, env = "NPS_COLUMN", value_name = "NAME")]
    pub column: Option<String>,

    /// How to show the rating distribution after the report.
    #[arg(long, value_enum, env = "NPS_CHART", default_value_t = ChartMode::Window)]
    pub chart: ChartMode,

    /// Also write the summary (counts, percentages, statistics, histogram) to JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Verbosity level on stderr (can be repeated: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors.
    #[arg(short, long)]
    pub quiet: bool,
}
