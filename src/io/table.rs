//! Tabular file loading.
//!
//! Turns a CSV or spreadsheet file into a [`Table`] of raw cells. No numeric
//! interpretation happens here; that is the rating extractor's job.
//!
//! Dispatch is on the (case-insensitive) file name suffix:
//! - `.csv`          -> `csv` crate, first record is the header
//! - `.xlsx`, `.xls` -> `calamine`, first worksheet, first row is the header

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::StringRecord;

use crate::domain::{Cell, Table};
use crate::error::NpsError;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    /// Resolve the format from the path's suffix.
    pub fn from_path(path: &Path) -> Result<Self, NpsError> {
        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".csv") {
            Ok(TableFormat::Csv)
        } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
            Ok(TableFormat::Spreadsheet)
        } else {
            Err(NpsError::UnsupportedFormat(path.to_path_buf()))
        }
    }
}

/// Load a table from `path`.
pub fn load_table(path: &Path) -> Result<Table, NpsError> {
    let format = TableFormat::from_path(path)?;
    log::debug!("loading {} as {:?}", path.display(), format);

    let table = match format {
        TableFormat::Csv => {
            let file = File::open(path).map_err(|e| open_error(path, e))?;
            read_csv(file)?
        }
        TableFormat::Spreadsheet => {
            // calamine hides the io::ErrorKind, so check existence up front.
            if !path.exists() {
                return Err(NpsError::FileNotFound(path.to_path_buf()));
            }
            read_workbook(path)?
        }
    };

    log::info!(
        "loaded {} row(s), {} column(s) from {}",
        table.rows.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

fn open_error(path: &Path, err: io::Error) -> NpsError {
    match err.kind() {
        io::ErrorKind::NotFound => NpsError::FileNotFound(path.to_path_buf()),
        _ => NpsError::ReadFailure(err.to_string()),
    }
}

/// Parse CSV data with a header row.
///
/// Short records are padded with empty cells on read; a record wider than the
/// header is malformed.
pub fn read_csv<R: Read>(reader: R) -> Result<Table, NpsError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| NpsError::ReadFailure(e.to_string()))?
        .clone();

    if headers.is_empty() {
        return Err(NpsError::ReadFailure("No columns to parse from file".to_string()));
    }

    let columns = unique_column_names(headers.iter().map(normalize_header_name));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| NpsError::ReadFailure(e.to_string()))?;
        if record.len() > columns.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(NpsError::ReadFailure(format!(
                "expected {} fields in line {line}, saw {}",
                columns.len(),
                record.len()
            )));
        }
        rows.push(csv_row(&record));
    }

    Ok(Table::new(columns, rows))
}

fn csv_row(record: &StringRecord) -> Vec<Cell> {
    record
        .iter()
        .map(|field| {
            if field.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(field.to_string())
            }
        })
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Left in place, the column would never match by name.
    name.trim_start_matches('\u{feff}').to_string()
}

fn read_workbook(path: &Path) -> Result<Table, NpsError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| NpsError::ReadFailure(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| NpsError::ReadFailure("workbook contains no worksheets".to_string()))?
        .map_err(|e| NpsError::ReadFailure(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Ok(Table::default());
    };

    let columns = unique_column_names(header.iter().map(|d| match spreadsheet_cell(d) {
        Cell::Empty => String::new(),
        cell => cell.to_string(),
    }));
    let rows = sheet_rows
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(Table::new(columns, rows))
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        // Dates, durations and error cells are never ratings; keep their text
        // so they still count as (non-numeric) cells.
        other => Cell::Text(other.to_string()),
    }
}

/// Give every column a unique, non-empty name.
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
/// suffixes in order of appearance, skipping names already taken.
pub fn unique_column_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for (idx, name) in names.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while out.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        out.push(candidate);
    }
    out
}
