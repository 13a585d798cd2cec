//! Interactive prompts for the file path and the rating column.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles flags and environment defaults
//! - the prompts fill in whatever is still missing
//!
//! Path validation is a plain function returning a result; the prompt loop is
//! a thin caller around it. Prompts are generic over reader/writer so they can
//! be driven from tests.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, NpsError};

pub const BANNER: &str = "--- NPS Calculator ---";
const PATH_PROMPT: &str = "Enter the full path to your file (CSV or Excel): ";
const COLUMN_PROMPT: &str = "Enter the exact name of the column containing the NPS rating: ";

/// Accept `input` as a path if something exists there.
pub fn validate_path(input: &str) -> Result<PathBuf, NpsError> {
    let path = PathBuf::from(input.trim());
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(NpsError::PathNotFound(path));
    }
    Ok(path)
}

/// Ask for a file path until an existing one is entered.
///
/// Only end of input (or an I/O error) stops the loop.
pub fn prompt_for_path<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf, AppError> {
    loop {
        let answer = read_answer(input, out, PATH_PROMPT)?;
        match validate_path(&answer) {
            Ok(path) => return Ok(path),
            Err(err) => {
                log::debug!("rejected path {answer:?}");
                writeln!(out, "{err}").map_err(write_error)?;
            }
        }
    }
}

/// Ask for the column name once.
pub fn prompt_for_column<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String, AppError> {
    read_answer(input, out, COLUMN_PROMPT)
}

/// Re-check a path given on the command line; `None` means "prompt instead".
pub fn accept_given_path<W: Write>(path: &Path, out: &mut W) -> Result<Option<PathBuf>, AppError> {
    match validate_path(&path.to_string_lossy()) {
        Ok(path) => Ok(Some(path)),
        Err(err) => {
            writeln!(out, "{err}").map_err(write_error)?;
            Ok(None)
        }
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String, AppError> {
    write!(out, "{prompt}").map_err(write_error)?;
    out.flush().map_err(write_error)?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Provide the inputs with `nps --file <PATH> --column <NAME>`.",
        ));
    }

    Ok(line.trim().to_string())
}

fn write_error(e: std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write prompt: {e}"))
}
