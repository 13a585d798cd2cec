//! Error types.
//!
//! Two layers:
//!
//! - [`NpsError`] is the outcome taxonomy of the report pipeline. Every variant
//!   is a *reportable halt*: the app prints its message and exits normally.
//! - [`AppError`] is a process-level failure (stdin closed, export failed) that
//!   maps to a non-zero exit code in `main`.

use std::path::PathBuf;

use thiserror::Error;

/// Why the pipeline stopped before producing a report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NpsError {
    /// Only raised at the interactive prompt; the caller re-prompts.
    #[error("Invalid path or file does not exist. Please try again.")]
    PathNotFound(PathBuf),

    #[error("Unsupported file format. Please use .csv, .xlsx, or .xls.")]
    UnsupportedFormat(PathBuf),

    #[error("Error: File not found at '{}'", .0.display())]
    FileNotFound(PathBuf),

    #[error("An error occurred while reading the file: {0}")]
    ReadFailure(String),

    #[error(
        "Error: Column '{column}' not found in the file.\nAvailable columns are: {}",
        format_column_list(.available)
    )]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("Error: The selected column contains no valid numeric ratings.")]
    NoValidRatings,

    #[error("Error: No ratings found within the 0-10 range in the selected column.")]
    NoRatingsInRange,
}

/// Render column names as a bracketed, quoted list: `['id', 'score']`.
fn format_column_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| quote_name(c)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single quotes unless the name holds a `'` and no `"`: `'id'`, `"it's"`.
fn quote_name(name: &str) -> String {
    let quote = if name.contains('\'') && !name.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for ch in name.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
