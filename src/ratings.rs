//! Column validation and rating extraction.
//!
//! Extraction is explicit about what happens to every cell:
//!
//! 1. coerce each cell into a [`CoercedCell`] (`value` is `None` when the
//!    cell is not a number)
//! 2. drop missing values, failing with `NoValidRatings` if none remain
//! 3. keep values in `[0, 10]`, failing with `NoRatingsInRange` if none remain
//!
//! Dropped cells are never errors on their own; they are only counted. They
//! do make the column a float column, which changes how min/max print.

use serde::Serialize;

use crate::domain::{Cell, NumberForm, RatingSeries, Table, is_in_range};
use crate::error::NpsError;

/// A cell paired with its numeric interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedCell<'a> {
    pub raw: &'a Cell,
    pub value: Option<f64>,
}

/// What happened to the cells of the rating column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExtractionAudit {
    pub cells_read: usize,
    pub dropped_non_numeric: usize,
    pub dropped_out_of_range: usize,
    pub kept: usize,
}

/// Extraction output: the validated series plus its audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: RatingSeries,
    pub audit: ExtractionAudit,
}

/// Find `column` in `table`, or report the columns that do exist.
pub fn column_index(table: &Table, column: &str) -> Result<usize, NpsError> {
    table
        .column_position(column)
        .ok_or_else(|| NpsError::ColumnNotFound {
            column: column.to_string(),
            available: table.columns.clone(),
        })
}

/// Interpret one cell as a number.
///
/// Text is trimmed and parsed as a float; NaN counts as missing. Infinite
/// values are numbers here and get removed by the range filter.
pub fn coerce_cell(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(v) => *v,
        Cell::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    if value.is_nan() { None } else { Some(value) }
}

/// A cell that reads as a whole number without any float notation.
fn is_integer_cell(cell: &Cell) -> bool {
    match cell {
        Cell::Empty => false,
        Cell::Number(v) => v.is_finite() && v.fract() == 0.0,
        Cell::Bool(_) => true,
        Cell::Text(s) => s.trim().parse::<i64>().is_ok(),
    }
}

/// Form of the whole column, before anything is dropped.
pub fn column_form(coerced: &[CoercedCell<'_>]) -> NumberForm {
    if coerced.iter().all(|c| is_integer_cell(c.raw)) {
        NumberForm::Integer
    } else {
        NumberForm::Float
    }
}

/// Coerce every cell of a column.
pub fn coerce_cells<'a, I>(cells: I) -> Vec<CoercedCell<'a>>
where
    I: IntoIterator<Item = &'a Cell>,
{
    cells
        .into_iter()
        .map(|raw| CoercedCell {
            raw,
            value: coerce_cell(raw),
        })
        .collect()
}

/// Turn raw column cells into a validated rating series.
pub fn extract_from_cells<'a, I>(cells: I) -> Result<Extraction, NpsError>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let coerced = coerce_cells(cells);
    let cells_read = coerced.len();
    let form = column_form(&coerced);

    let numeric: Vec<f64> = coerced.iter().filter_map(|c| c.value).collect();
    if numeric.is_empty() {
        return Err(NpsError::NoValidRatings);
    }
    let dropped_non_numeric = cells_read - numeric.len();

    let in_range: Vec<f64> = numeric.iter().copied().filter(|v| is_in_range(*v)).collect();
    let dropped_out_of_range = numeric.len() - in_range.len();

    let kept = in_range.len();
    let series = RatingSeries::from_validated(in_range)
        .ok_or(NpsError::NoRatingsInRange)?
        .with_form(form);

    Ok(Extraction {
        series,
        audit: ExtractionAudit {
            cells_read,
            dropped_non_numeric,
            dropped_out_of_range,
            kept,
        },
    })
}

/// Validate `column` and extract its ratings from `table`.
pub fn extract_ratings(table: &Table, column: &str) -> Result<Extraction, NpsError> {
    let idx = column_index(table, column)?;
    let extraction = extract_from_cells(table.column_cells(idx))?;

    let audit = &extraction.audit;
    log::info!(
        "column '{column}': {} cell(s), {} non-numeric, {} out of range, {} kept",
        audit.cells_read,
        audit.dropped_non_numeric,
        audit.dropped_out_of_range,
        audit.kept
    );
    Ok(extraction)
}
